// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{select_cover, Cover},
    coverage::CoverageTable,
    errors::{IndexKind, MinimizeError},
    primes::prime_implicants,
    term::{Term, MAX_WIDTH},
};
use std::collections::BTreeSet;
use tracing::debug;

/// A single-output boolean function, given by its minterms and don't-cares. Every other index is
/// part of the off-set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicFunction {
    num_variables: usize,
    minterms: BTreeSet<u32>,
    dont_cares: BTreeSet<u32>,
}

impl LogicFunction {
    /// Creates a new function, checking that every index is in range for `num_variables` and
    /// that no index is both a minterm and a don't-care.
    pub fn new(
        num_variables: usize,
        minterms: impl IntoIterator<Item = u32>,
        dont_cares: impl IntoIterator<Item = u32>,
    ) -> Result<Self, MinimizeError> {
        if num_variables > MAX_WIDTH {
            return Err(MinimizeError::TooManyVariables { num_variables });
        }

        let minterms = collect_indexes(num_variables, minterms, IndexKind::Minterm)?;
        let dont_cares = collect_indexes(num_variables, dont_cares, IndexKind::DontCare)?;
        if let Some(&index) = minterms.intersection(&dont_cares).next() {
            return Err(MinimizeError::Overlap { index });
        }

        Ok(Self {
            num_variables,
            minterms,
            dont_cares,
        })
    }

    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    #[inline]
    pub fn minterms(&self) -> &BTreeSet<u32> {
        &self.minterms
    }

    #[inline]
    pub fn dont_cares(&self) -> &BTreeSet<u32> {
        &self.dont_cares
    }

    /// Returns the value of the function at `index`, or `None` for a don't-care.
    pub fn evaluate(&self, index: u32) -> Option<bool> {
        if self.minterms.contains(&index) {
            Some(true)
        } else if self.dont_cares.contains(&index) {
            None
        } else {
            Some(false)
        }
    }

    /// Computes a sum-of-products cover of this function.
    ///
    /// Don't-cares take part in prime implicant generation but never need to be covered. The
    /// cover always contains every essential prime implicant; the remainder is chosen greedily, so
    /// the result is small but not necessarily minimum.
    pub fn minimize(&self) -> Result<Cover, MinimizeError> {
        let required = self.encode_all(&self.minterms)?;
        let dont_cares = self.encode_all(&self.dont_cares)?;

        let primes = prime_implicants(required.iter().chain(&dont_cares).copied());
        debug!(
            num_variables = self.num_variables,
            minterms = required.len(),
            dont_cares = dont_cares.len(),
            primes = primes.len(),
            "generated prime implicants"
        );

        let table = CoverageTable::build(required, &primes)?;
        let selection = select_cover(&primes, table)?;
        debug!(
            essential = selection.essential.len(),
            greedy = selection.greedy.len(),
            "selected cover"
        );

        Ok(Cover::new(self.num_variables, selection.terms()))
    }

    fn encode_all(&self, indexes: &BTreeSet<u32>) -> Result<Vec<Term>, MinimizeError> {
        indexes
            .iter()
            .map(|&index| Term::encode(index, self.num_variables).map_err(MinimizeError::from))
            .collect()
    }
}

/// Minimizes the function over `num_variables` variables that is true on `minterms`, unspecified
/// on `dont_cares`, and false everywhere else.
///
/// # Examples
///
/// ```
/// let cover = qm_min::minimize(3, [0, 1, 2, 3], []).unwrap();
/// assert_eq!(cover.matrix_display().to_string(), "0--\n");
/// ```
pub fn minimize(
    num_variables: usize,
    minterms: impl IntoIterator<Item = u32>,
    dont_cares: impl IntoIterator<Item = u32>,
) -> Result<Cover, MinimizeError> {
    LogicFunction::new(num_variables, minterms, dont_cares)?.minimize()
}

fn collect_indexes(
    num_variables: usize,
    indexes: impl IntoIterator<Item = u32>,
    kind: IndexKind,
) -> Result<BTreeSet<u32>, MinimizeError> {
    indexes
        .into_iter()
        .map(|index| {
            if (index as u64) >> num_variables == 0 {
                Ok(index)
            } else {
                Err(MinimizeError::IndexOutOfRange {
                    kind,
                    index,
                    num_variables,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Symbol;
    use proptest::prelude::*;

    fn minimized(num_variables: usize, minterms: &[u32], dont_cares: &[u32]) -> Vec<String> {
        minimize(
            num_variables,
            minterms.iter().copied(),
            dont_cares.iter().copied(),
        )
        .unwrap()
        .iter()
        .map(|term| term.to_string())
        .collect()
    }

    #[test]
    fn test_constant_one() {
        assert_eq!(minimized(3, &[0, 1, 2, 3, 4, 5, 6, 7], &[]), ["---"]);
        assert_eq!(minimized(0, &[0], &[]), [""]);
    }

    #[test]
    fn test_single_minterm() {
        assert_eq!(minimized(2, &[0], &[]), ["00"]);
    }

    #[test]
    fn test_top_bit_zero() {
        assert_eq!(minimized(3, &[0, 1, 2, 3], &[]), ["0--"]);
    }

    #[test]
    fn test_constant_zero() {
        assert!(minimized(3, &[], &[]).is_empty());
        assert!(minimized(0, &[], &[]).is_empty());
        // Don't-cares alone never need to be covered.
        assert!(minimized(3, &[], &[1, 3]).is_empty());
        assert!(minimized(0, &[], &[0]).is_empty());
    }

    #[test]
    fn test_dont_cares() {
        assert_eq!(
            minimized(4, &[4, 8, 10, 11, 12, 15], &[9, 14]),
            ["10--", "1-1-", "-100"]
        );
        assert_eq!(
            minimized(3, &[1, 5], &[3, 7]),
            ["--1"],
            "don't-cares widen the implicant"
        );
        // Without the don't-cares the result needs more literals.
        assert_eq!(minimized(3, &[1, 5], &[]), ["-01"]);
    }

    #[test]
    fn test_cyclic() {
        assert_eq!(
            minimized(3, &[0, 1, 2, 5, 6, 7], &[]),
            ["00-", "0-0", "11-", "1-1"]
        );
    }

    #[test]
    fn test_xor() {
        assert_eq!(minimized(2, &[1, 2], &[]), ["01", "10"]);
    }

    #[test]
    fn test_invalid_input() {
        let err = minimize(3, [1, 8], []).unwrap_err();
        assert_eq!(
            err,
            MinimizeError::IndexOutOfRange {
                kind: IndexKind::Minterm,
                index: 8,
                num_variables: 3
            }
        );
        assert!(err.is_invalid_input());

        assert_eq!(
            minimize(2, [1], [4]).unwrap_err(),
            MinimizeError::IndexOutOfRange {
                kind: IndexKind::DontCare,
                index: 4,
                num_variables: 2
            }
        );
        assert_eq!(
            minimize(3, [1, 2, 5], [5, 6]).unwrap_err(),
            MinimizeError::Overlap { index: 5 }
        );
        assert_eq!(
            minimize(0, [1], []).unwrap_err(),
            MinimizeError::IndexOutOfRange {
                kind: IndexKind::Minterm,
                index: 1,
                num_variables: 0
            }
        );
        assert_eq!(
            minimize(33, [], []).unwrap_err(),
            MinimizeError::TooManyVariables { num_variables: 33 }
        );
    }

    #[test]
    fn test_wide() {
        let cover = minimize(32, [u32::MAX, u32::MAX - 1], []).unwrap();
        assert_eq!(
            cover.iter().map(|term| term.to_string()).collect::<Vec<_>>(),
            [format!("{}-", "1".repeat(31))]
        );
    }

    #[test]
    fn test_evaluate() {
        let function = LogicFunction::new(2, [1, 2], [3]).unwrap();
        assert_eq!(function.evaluate(0), Some(false));
        assert_eq!(function.evaluate(1), Some(true));
        assert_eq!(function.evaluate(3), None);
    }

    proptest! {
        #[test]
        fn proptest_sound_and_exact(function: LogicFunction) {
            let cover = function.minimize().unwrap();
            prop_assert_eq!(cover.width(), function.num_variables());
            cover.check_cover_of(&function).unwrap();
        }

        #[test]
        fn proptest_deterministic(function: LogicFunction) {
            let first = function.minimize().unwrap();
            let second = function.minimize().unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn proptest_essentials_kept(function: LogicFunction) {
            let cover = function.minimize().unwrap();

            let required = function.encode_all(function.minterms()).unwrap();
            let dont_cares = function.encode_all(function.dont_cares()).unwrap();
            let primes = prime_implicants(required.iter().chain(&dont_cares).copied());
            let table = CoverageTable::build(required, &primes).unwrap();
            for essential in table.essential_implicants() {
                prop_assert!(cover.contains(&essential), "essential {} dropped", essential);
            }
            for term in &cover {
                prop_assert!(primes.contains(term), "{} is not a prime implicant", term);
            }
        }

        #[test]
        fn proptest_primes_are_maximal(function: LogicFunction) {
            // No prime can be widened at any position without covering an off-set index.
            let all = function.minterms().iter().chain(function.dont_cares()).copied();
            let terms: Vec<_> = all
                .map(|index| Term::encode(index, function.num_variables()).unwrap())
                .collect();
            for prime in prime_implicants(terms) {
                for position in 0..prime.width() {
                    let mut symbols = prime.symbols();
                    if symbols[position].is_wildcard() {
                        continue;
                    }
                    symbols[position] = Symbol::DontCare;
                    let widened = Term::from_symbols(symbols).unwrap();
                    prop_assert!(
                        widened.minterms().any(|index| function.evaluate(index) == Some(false)),
                        "{} can be widened to {}",
                        prime,
                        widened
                    );
                }
            }
        }
    }
}
