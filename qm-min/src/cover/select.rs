// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{coverage::CoverageTable, errors::MinimizeError, term::Term};
use std::collections::BTreeSet;
use tracing::debug;

/// Implicants chosen to cover a [`CoverageTable`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverSelection {
    /// Implicants that were the only coverer of some minterm.
    pub essential: BTreeSet<Term>,
    /// Implicants picked afterwards, in the order they were picked.
    pub greedy: Vec<Term>,
}

impl CoverSelection {
    /// Iterates over every selected implicant, essentials first.
    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        self.essential.iter().chain(&self.greedy).copied()
    }
}

/// Selects implicants from `primes` until every minterm in `table` is covered.
///
/// Essential implicants are taken first. The rest of the table is then covered greedily: each
/// step picks the prime matching the most remaining minterms, breaking ties towards the smallest
/// term. This approximates a minimum cover and is not guaranteed to find one.
pub fn select_cover(
    primes: &BTreeSet<Term>,
    mut table: CoverageTable,
) -> Result<CoverSelection, MinimizeError> {
    let essential = table.essential_implicants();
    for implicant in &essential {
        let removed = table.remove_covered_by(implicant);
        debug!(%implicant, removed, "selected essential implicant");
    }

    let mut greedy = Vec::new();
    loop {
        let minterm = match table.minterms().next() {
            Some(&minterm) => minterm,
            None => break,
        };
        let best = primes
            .iter()
            .map(|prime| (table.count_covered_by(prime), prime))
            .filter(|(count, _)| *count > 0)
            .max_by(|(a_count, a), (b_count, b)| a_count.cmp(b_count).then_with(|| b.cmp(a)));

        let (count, implicant) = match best {
            Some(best) => best,
            None => return Err(MinimizeError::UncoveredMinterm { minterm }),
        };
        table.remove_covered_by(implicant);
        debug!(%implicant, count, remaining = table.len(), "selected implicant greedily");
        greedy.push(*implicant);
    }

    Ok(CoverSelection { essential, greedy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::prime_implicants;

    fn encoded(width: usize, indexes: impl IntoIterator<Item = u32>) -> Vec<Term> {
        indexes
            .into_iter()
            .map(|index| Term::encode(index, width).unwrap())
            .collect()
    }

    fn terms<'a>(strs: impl IntoIterator<Item = &'a str>) -> Vec<Term> {
        strs.into_iter().map(|s| s.parse().unwrap()).collect()
    }

    fn select(width: usize, minterms: &[u32], dont_cares: &[u32]) -> CoverSelection {
        let all = minterms.iter().chain(dont_cares).copied();
        let primes = prime_implicants(encoded(width, all));
        let table = CoverageTable::build(encoded(width, minterms.iter().copied()), &primes).unwrap();
        select_cover(&primes, table).unwrap()
    }

    #[test]
    fn test_essentials_only() {
        let selection = select(4, &[0, 2, 5, 7, 8, 10, 13, 15], &[]);
        assert_eq!(
            selection.essential,
            terms(["-0-0", "-1-1"]).into_iter().collect::<BTreeSet<_>>()
        );
        assert!(selection.greedy.is_empty());
    }

    #[test]
    fn test_essentials_then_greedy() {
        let selection = select(4, &[4, 8, 10, 11, 12, 15], &[9, 14]);
        assert_eq!(
            selection.essential,
            terms(["1-1-", "-100"]).into_iter().collect::<BTreeSet<_>>()
        );
        // 10-- and 1--0 both cover 1000; 10-- sorts first.
        assert_eq!(selection.greedy, terms(["10--"]));
    }

    #[test]
    fn test_cyclic() {
        // Every minterm has two coverers, so there are no essentials. Each greedy step takes the
        // smallest of the tied candidates.
        let selection = select(3, &[0, 1, 2, 5, 6, 7], &[]);
        assert!(selection.essential.is_empty());
        assert_eq!(selection.greedy, terms(["00-", "11-", "0-0", "1-1"]));
    }

    #[test]
    fn test_greedy_prefers_larger_coverage() {
        let selection = select(4, &[0, 1, 2, 5, 6, 7, 8, 9, 10, 14], &[]);
        assert_eq!(
            selection.essential,
            terms(["-00-", "--10"]).into_iter().collect::<BTreeSet<_>>()
        );
        assert_eq!(selection.greedy, terms(["01-1"]));
    }

    #[test]
    fn test_greedy_rounds() {
        // Every minterm has two coverers. The first pick leaves 100 behind, which the second
        // pick covers after a tie between -0- and 1-0.
        let primes = terms(["0--", "-0-", "-1-", "1-0"]).into_iter().collect();
        let table = CoverageTable::build(encoded(3, [0, 1, 2, 3, 4]), &primes).unwrap();
        assert!(table.essential_implicants().is_empty());

        let selection = select_cover(&primes, table).unwrap();
        assert!(selection.essential.is_empty());
        assert_eq!(selection.greedy, terms(["0--", "1-0"]));
    }

    #[test]
    fn test_empty_table() {
        let selection = select(3, &[], &[1, 3]);
        assert_eq!(selection, CoverSelection::default());
    }

    #[test]
    fn test_uncoverable() {
        // Two coverers, so neither is essential and the greedy phase has to find one.
        let primes = terms(["00-", "0-0"]).into_iter().collect();
        let table = CoverageTable::build(encoded(3, [0]), &primes).unwrap();
        let other_primes = terms(["11-"]).into_iter().collect();
        let err = select_cover(&other_primes, table).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::UncoveredMinterm {
                minterm: "000".parse().unwrap()
            }
        );
    }
}
