// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::term::Term;
use itertools::Itertools;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// The outcome of one merge round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeRound {
    /// Terms that had no merge partner in this round.
    pub primes: BTreeSet<Term>,
    /// Merged terms, forming the working set of the next round.
    pub next: BTreeSet<Term>,
}

/// Runs one round of adjacency merging over `terms`.
///
/// Only terms sharing a wildcard mask can merge, so candidates are grouped by mask before pairs
/// are tried.
pub fn merge_round(terms: &BTreeSet<Term>) -> MergeRound {
    let mut used = BTreeSet::new();
    let mut next = BTreeSet::new();

    let groups = terms.iter().into_group_map_by(|term| term.mask());
    for group in groups.values() {
        for (a, b) in group.iter().tuple_combinations() {
            if let Some(merged) = a.mergeable(b) {
                trace!(%a, %b, %merged, "merged terms");
                next.insert(merged);
                used.insert(**a);
                used.insert(**b);
            }
        }
    }

    let primes = terms
        .iter()
        .filter(|term| !used.contains(*term))
        .copied()
        .collect();
    MergeRound { primes, next }
}

/// Computes every prime implicant of the function whose on-set and don't-care set together are
/// `terms`.
///
/// Each round's output has one more wildcard per term than its input, so this finishes in at most
/// `width + 1` rounds.
pub fn prime_implicants(terms: impl IntoIterator<Item = Term>) -> BTreeSet<Term> {
    let mut working: BTreeSet<Term> = terms.into_iter().collect();
    let mut primes = BTreeSet::new();

    let mut round = 0;
    while !working.is_empty() {
        let MergeRound { primes: found, next } = merge_round(&working);
        debug!(
            round,
            working = working.len(),
            primes = found.len(),
            next = next.len(),
            "finished merge round"
        );
        primes.extend(found);
        working = next;
        round += 1;
    }

    primes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms<'a>(strs: impl IntoIterator<Item = &'a str>) -> BTreeSet<Term> {
        strs.into_iter().map(|s| s.parse().unwrap()).collect()
    }

    fn encoded(width: usize, indexes: impl IntoIterator<Item = u32>) -> BTreeSet<Term> {
        indexes
            .into_iter()
            .map(|index| Term::encode(index, width).unwrap())
            .collect()
    }

    #[test]
    fn test_merge_round() {
        let round = merge_round(&encoded(3, [0, 1, 3, 7]));
        assert_eq!(round.primes, BTreeSet::new(), "every minterm has a partner");
        assert_eq!(round.next, terms(["00-", "0-1", "-11"]));

        let round = merge_round(&round.next);
        assert_eq!(round.primes, terms(["00-", "0-1", "-11"]));
        assert!(round.next.is_empty());
    }

    #[test]
    fn test_merge_round_isolated() {
        let round = merge_round(&encoded(3, [0, 3, 5]));
        assert_eq!(round.primes, encoded(3, [0, 3, 5]));
        assert!(round.next.is_empty());
    }

    #[test]
    fn test_merge_round_duplicates() {
        // 0-0 and -00 both lead to --0 in the next round, which is only recorded once.
        let round = merge_round(&terms(["0-0", "1-0", "-00", "-10"]));
        assert_eq!(round.next, terms(["--0"]));
        assert!(round.primes.is_empty());
    }

    #[test]
    fn test_prime_implicants() {
        let primes = prime_implicants(encoded(3, [0, 1, 2, 5, 6, 7]));
        assert_eq!(primes, terms(["00-", "0-0", "-01", "-10", "1-1", "11-"]));

        let primes = prime_implicants(encoded(3, 0..8));
        assert_eq!(primes, terms(["---"]));

        let primes = prime_implicants(encoded(4, [4, 8, 9, 10, 11, 12, 14, 15]));
        assert_eq!(primes, terms(["10--", "1-1-", "1--0", "-100"]));

        assert!(prime_implicants(BTreeSet::<Term>::new()).is_empty());
    }

    #[test]
    fn test_prime_implicants_mixed_sizes() {
        // 100 through 111 collapse into 1--, while 011 only merges with 111.
        let primes = prime_implicants(encoded(3, [3, 4, 5, 6, 7]));
        assert_eq!(primes, terms(["1--", "-11"]));
    }
}
