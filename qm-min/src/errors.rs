// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::term::{Term, MAX_WIDTH};
use std::fmt;
use thiserror::Error;

/// Errors produced while constructing a [`Term`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TermError {
    /// The index cannot be represented with `width` binary digits.
    #[error("index {index} does not fit in a term of width {width}")]
    InvalidWidth { index: u32, width: usize },

    /// More positions were requested than a term can hold.
    #[error("term width {width} exceeds the maximum of {}", MAX_WIDTH)]
    TooWide { width: usize },

    /// A character other than `0`, `1` or `-` was found while parsing.
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
}

/// Errors produced by [`minimize`](crate::minimize) and
/// [`LogicFunction::new`](crate::logic_function::LogicFunction::new).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    #[error("{num_variables} variables exceeds the maximum of {}", MAX_WIDTH)]
    TooManyVariables { num_variables: usize },

    #[error("{kind} index {index} is out of range for {num_variables} variables")]
    IndexOutOfRange {
        kind: IndexKind,
        index: u32,
        num_variables: usize,
    },

    #[error("index {index} is listed as both a minterm and a don't-care")]
    Overlap { index: u32 },

    /// No prime implicant matches a required minterm. This indicates a defect in implicant
    /// generation, not bad input.
    #[error("minterm {minterm} is not covered by any prime implicant")]
    UncoveredMinterm { minterm: Term },

    #[error(transparent)]
    Term(#[from] TermError),
}

impl MinimizeError {
    /// Returns true if this error was caused by the caller's input rather than an internal
    /// invariant violation.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::TooManyVariables { .. } | Self::IndexOutOfRange { .. } | Self::Overlap { .. }
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexKind {
    Minterm,
    DontCare,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Minterm => write!(f, "minterm"),
            Self::DontCare => write!(f, "don't-care"),
        }
    }
}

/// A reason why a [`Cover`](crate::cover::Cover) does not implement a
/// [`LogicFunction`](crate::logic_function::LogicFunction).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoverMismatch {
    #[error("cover has width {cover_width} but the function has {num_variables} variables")]
    WidthMismatch {
        cover_width: usize,
        num_variables: usize,
    },

    #[error("minterm {index} is not covered by any term")]
    Uncovered { index: u32 },

    #[error("term {term} covers index {index}, which is neither a minterm nor a don't-care")]
    Overreach { term: Term, index: u32 },
}
