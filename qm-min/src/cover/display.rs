// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::Cover,
    term::{Symbol, Term},
};
use itertools::Itertools;
use std::{borrow::Cow, fmt};

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&format_args!("{}", self.algebraic_display()))
            .finish()
    }
}

/// Displays a cover as one term per line, in the form `10-1`.
#[derive(Clone, Debug)]
pub struct CoverMatrixDisplay<'a> {
    cover: &'a Cover,
    term_separator: (Cow<'a, str>, bool),
}

impl<'a> CoverMatrixDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            term_separator: (Cow::Borrowed("\n"), true),
        }
    }

    /// Sets the separator between terms, and whether it's also printed after the last one.
    pub fn with_term_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.term_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for CoverMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let term_count = self.cover.len();
        let (separator, print_last) = &self.term_separator;
        for (term_ix, term) in self.cover.iter().enumerate() {
            write!(f, "{}", term)?;
            if *print_last || term_ix < term_count - 1 {
                write!(f, "{}", separator)?;
            }
        }

        Ok(())
    }
}

/// Displays a cover as a sum of products such as `a'b + c`.
///
/// Variables are named `a`, `b`, `c`, ... unless labels are provided. The empty cover is displayed
/// as `0` and a term without literals as `1`.
#[derive(Clone, Debug)]
pub struct CoverAlgebraicDisplay<'a> {
    cover: &'a Cover,
    labels: Option<Vec<Cow<'a, str>>>,
}

impl<'a> CoverAlgebraicDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            labels: None,
        }
    }

    /// Uses `labels` as variable names, most-significant variable first.
    ///
    /// Panics if the number of labels differs from the width of the cover.
    pub fn with_labels<S>(mut self, labels: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Cow<'a, str>>,
    {
        let labels: Vec<_> = labels.into_iter().map(Into::into).collect();
        assert_eq!(
            labels.len(),
            self.cover.width(),
            "label count must match cover width"
        );
        self.labels = Some(labels);
        self
    }

    fn write_term(&self, f: &mut fmt::Formatter, term: &Term) -> fmt::Result {
        if term.literal_count() == 0 {
            return write!(f, "1");
        }

        // Labels longer than one character are separated by spaces to keep products readable.
        let spaced = self
            .labels
            .as_ref()
            .map_or(false, |labels| labels.iter().any(|label| label.len() > 1));

        let literals = term
            .symbols()
            .into_iter()
            .enumerate()
            .filter(|(_, symbol)| !symbol.is_wildcard())
            .map(|(input_ix, symbol)| {
                let name = match &self.labels {
                    Some(labels) => labels[input_ix].to_string(),
                    None => AlgebraicSymbol::input(input_ix).to_string(),
                };
                match symbol {
                    Symbol::Zero => format!("{}'", name),
                    _ => name,
                }
            });

        if spaced {
            write!(f, "{}", literals.format(" "))
        } else {
            write!(f, "{}", literals.format(""))
        }
    }
}

impl<'a> fmt::Display for CoverAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cover.is_empty() {
            return write!(f, "0");
        }
        for (term_ix, term) in self.cover.iter().enumerate() {
            if term_ix > 0 {
                write!(f, " + ")?;
            }
            self.write_term(f, term)?;
        }
        Ok(())
    }
}

const INPUT_ALGEBRAIC_SYMBOLS: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Default name of an input variable: `a` through `z`, then `ba`, `bb`, ...
#[derive(Debug)]
pub(crate) enum AlgebraicSymbol {
    Char(char),
    String(String),
}

impl AlgebraicSymbol {
    pub(crate) fn input(input_ix: usize) -> Self {
        if input_ix < 26 {
            return Self::Char(INPUT_ALGEBRAIC_SYMBOLS[input_ix]);
        }
        let last_ch = INPUT_ALGEBRAIC_SYMBOLS[input_ix % 26];

        match Self::input(input_ix / 26) {
            Self::Char(ch) => Self::String(format!("{}{}", ch, last_ch)),
            Self::String(mut s) => {
                s.push(last_ch);
                Self::String(s)
            }
        }
    }
}

impl fmt::Display for AlgebraicSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(ch) => write!(f, "{}", *ch),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}
