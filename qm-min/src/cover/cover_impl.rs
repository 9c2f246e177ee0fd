// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::{CoverAlgebraicDisplay, CoverMatrixDisplay},
    errors::CoverMismatch,
    logic_function::LogicFunction,
    term::Term,
};
use std::{collections::BTreeSet, slice};

/// A sum of product terms of a common width, kept sorted and free of duplicates.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Cover {
    width: usize,
    terms: Vec<Term>,
}

impl Cover {
    /// Creates a cover over `width` variables.
    ///
    /// Panics if any term has a different width.
    pub fn new(width: usize, terms: impl IntoIterator<Item = Term>) -> Self {
        let terms: BTreeSet<_> = terms.into_iter().collect();
        for term in &terms {
            assert_eq!(
                term.width(),
                width,
                "term {} must have width {}",
                term,
                width
            );
        }
        Self {
            width,
            terms: terms.into_iter().collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[inline]
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Term> {
        self.terms.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn contains(&self, term: &Term) -> bool {
        self.terms.binary_search(term).is_ok()
    }

    /// Returns the value of the cover at minterm `index`.
    pub fn evaluate(&self, index: u32) -> bool {
        self.terms.iter().any(|term| term.matches_index(index))
    }

    /// Checks that this cover implements `function`: every minterm is covered, and no term covers
    /// an index outside the minterms and don't-cares.
    ///
    /// This expands every term, so it is only practical for small widths.
    pub fn check_cover_of(&self, function: &LogicFunction) -> Result<(), CoverMismatch> {
        if self.width != function.num_variables() {
            return Err(CoverMismatch::WidthMismatch {
                cover_width: self.width,
                num_variables: function.num_variables(),
            });
        }

        if let Some(&index) = function
            .minterms()
            .iter()
            .find(|&&index| !self.evaluate(index))
        {
            return Err(CoverMismatch::Uncovered { index });
        }

        for term in &self.terms {
            if let Some(index) = term
                .minterms()
                .find(|&index| function.evaluate(index) == Some(false))
            {
                return Err(CoverMismatch::Overreach { term: *term, index });
            }
        }

        Ok(())
    }

    #[inline]
    pub fn matrix_display(&self) -> CoverMatrixDisplay<'_> {
        CoverMatrixDisplay::new(self)
    }

    #[inline]
    pub fn algebraic_display(&self) -> CoverAlgebraicDisplay<'_> {
        CoverAlgebraicDisplay::new(self)
    }
}

impl<'a> IntoIterator for &'a Cover {
    type Item = &'a Term;
    type IntoIter = slice::Iter<'a, Term>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cover(width: usize, strs: &[&str]) -> Cover {
        Cover::new(width, strs.iter().map(|s| s.parse().unwrap()))
    }

    #[test]
    fn test_new_sorts() {
        let c = cover(3, &["-01", "1-1", "00-", "1-1"]);
        assert_eq!(c.len(), 3);
        assert_eq!(
            c.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
            ["00-", "1-1", "-01"]
        );
        assert!(c.contains(&"1-1".parse().unwrap()));
        assert!(!c.contains(&"1-0".parse().unwrap()));
    }

    #[test]
    #[should_panic(expected = "must have width 3")]
    fn test_new_width_mismatch() {
        cover(3, &["00-", "1-"]);
    }

    #[test]
    fn test_evaluate() {
        let c = cover(3, &["00-", "11-"]);
        let values: Vec<_> = (0..8).map(|index| c.evaluate(index)).collect();
        assert_eq!(
            values,
            [true, true, false, false, false, false, true, true]
        );

        let empty = Cover::new(3, Vec::<Term>::new());
        assert!((0..8).all(|index| !empty.evaluate(index)));
    }

    #[test]
    fn test_check_cover_of() {
        let function = LogicFunction::new(3, [0, 1, 6], [7]).unwrap();
        assert_eq!(cover(3, &["00-", "11-"]).check_cover_of(&function), Ok(()));
        assert_eq!(
            cover(3, &["00-"]).check_cover_of(&function),
            Err(CoverMismatch::Uncovered { index: 6 })
        );
        assert_eq!(
            cover(3, &["00-", "-1-"]).check_cover_of(&function),
            Err(CoverMismatch::Overreach {
                term: "-1-".parse().unwrap(),
                index: 2
            })
        );
        assert_eq!(
            cover(2, &["0-"]).check_cover_of(&function),
            Err(CoverMismatch::WidthMismatch {
                cover_width: 2,
                num_variables: 3
            })
        );
    }
}
