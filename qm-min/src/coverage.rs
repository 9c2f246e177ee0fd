// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::MinimizeError, term::Term};
use std::collections::{BTreeMap, BTreeSet};

/// Maps each required minterm that is not yet covered to the prime implicants matching it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoverageTable {
    entries: BTreeMap<Term, Vec<Term>>,
}

impl CoverageTable {
    /// Builds the table for `required` minterms against `primes`.
    ///
    /// Returns `UncoveredMinterm` if some minterm is matched by no prime.
    pub fn build(
        required: impl IntoIterator<Item = Term>,
        primes: &BTreeSet<Term>,
    ) -> Result<Self, MinimizeError> {
        let mut entries = BTreeMap::new();
        for minterm in required {
            let covering: Vec<_> = primes
                .iter()
                .filter(|prime| prime.matches(&minterm))
                .copied()
                .collect();
            if covering.is_empty() {
                return Err(MinimizeError::UncoveredMinterm { minterm });
            }
            entries.insert(minterm, covering);
        }
        Ok(Self { entries })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the implicants covering `minterm`, or `None` if it isn't in the table.
    pub fn covering(&self, minterm: &Term) -> Option<&[Term]> {
        self.entries.get(minterm).map(|covering| covering.as_slice())
    }

    pub fn minterms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.entries.keys()
    }

    /// Implicants that are the only coverer of some minterm in the table.
    pub fn essential_implicants(&self) -> BTreeSet<Term> {
        self.entries
            .values()
            .filter_map(|covering| match covering.as_slice() {
                [only] => Some(*only),
                _ => None,
            })
            .collect()
    }

    /// Number of minterms in the table that `implicant` matches.
    pub fn count_covered_by(&self, implicant: &Term) -> usize {
        self.minterms()
            .filter(|minterm| implicant.matches(minterm))
            .count()
    }

    /// Removes every minterm that `implicant` matches, returning how many were removed.
    pub fn remove_covered_by(&mut self, implicant: &Term) -> usize {
        let before = self.entries.len();
        self.entries.retain(|minterm, _| !implicant.matches(minterm));
        before - self.entries.len()
    }
}
