// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed-width product terms over the symbols `0`, `1` and `-`.

use crate::errors::TermError;
use arrayvec::ArrayVec;
use std::{cmp::Ordering, fmt, str::FromStr};

/// The largest number of variables a [`Term`] can hold.
pub const MAX_WIDTH: usize = 32;

/// A single position in a [`Term`].
///
/// The derived ordering is `Zero < One < DontCare`, which is the order used to sort terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Zero,
    One,
    DontCare,
}

impl Symbol {
    #[inline]
    pub fn to_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::DontCare => '-',
        }
    }

    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Self::Zero),
            '1' => Some(Self::One),
            '-' => Some(Self::DontCare),
            _ => None,
        }
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        matches!(self, Self::DontCare)
    }
}

impl From<Option<bool>> for Symbol {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(false) => Self::Zero,
            Some(true) => Self::One,
            None => Self::DontCare,
        }
    }
}

impl From<Symbol> for Option<bool> {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Zero => Some(false),
            Symbol::One => Some(true),
            Symbol::DontCare => None,
        }
    }
}

/// A product term of fixed width, most-significant variable first.
///
/// Stored packed: `mask` has a bit set for every wildcard position, and `bits` holds the literal
/// values for the remaining positions. Bits under the mask are always zero, so the derived
/// equality and hash agree with symbol-wise equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Term {
    width: u8,
    bits: u32,
    mask: u32,
}

impl Term {
    /// Encodes a minterm index as a fully-specified term of `width` positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use qm_min::term::Term;
    ///
    /// let term = Term::encode(5, 4).unwrap();
    /// assert_eq!(term.to_string(), "0101");
    /// assert!(Term::encode(16, 4).is_err());
    /// ```
    pub fn encode(index: u32, width: usize) -> Result<Self, TermError> {
        if width > MAX_WIDTH {
            return Err(TermError::TooWide { width });
        }
        if index & !full_mask(width) != 0 {
            return Err(TermError::InvalidWidth { index, width });
        }
        Ok(Self {
            width: width as u8,
            bits: index,
            mask: 0,
        })
    }

    /// The term with every position a wildcard, matching every minterm.
    pub fn universe(width: usize) -> Result<Self, TermError> {
        if width > MAX_WIDTH {
            return Err(TermError::TooWide { width });
        }
        Ok(Self {
            width: width as u8,
            bits: 0,
            mask: full_mask(width),
        })
    }

    pub fn from_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Result<Self, TermError> {
        let mut width = 0;
        let mut bits = 0_u32;
        let mut mask = 0_u32;
        for symbol in symbols {
            if width == MAX_WIDTH {
                return Err(TermError::TooWide { width: width + 1 });
            }
            bits <<= 1;
            mask <<= 1;
            match symbol {
                Symbol::Zero => {}
                Symbol::One => bits |= 1,
                Symbol::DontCare => mask |= 1,
            }
            width += 1;
        }
        Ok(Self {
            width: width as u8,
            bits,
            mask,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Literal values, with zeroes at wildcard positions.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Wildcard positions.
    #[inline]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    #[inline]
    pub fn wildcard_count(&self) -> usize {
        self.mask.count_ones() as usize
    }

    #[inline]
    pub fn literal_count(&self) -> usize {
        self.width() - self.wildcard_count()
    }

    /// Returns the index this term encodes, if it has no wildcards.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        (self.mask == 0).then(|| self.bits)
    }

    /// Returns the symbol at `position`, counting from the most-significant variable.
    ///
    /// Panics if `position` is out of range.
    pub fn symbol(&self, position: usize) -> Symbol {
        assert!(
            position < self.width(),
            "position {} must be in range [0..{})",
            position,
            self.width()
        );
        let bit = 1 << (self.width() - 1 - position);
        if self.mask & bit != 0 {
            Symbol::DontCare
        } else if self.bits & bit != 0 {
            Symbol::One
        } else {
            Symbol::Zero
        }
    }

    pub fn symbols(&self) -> ArrayVec<Symbol, MAX_WIDTH> {
        (0..self.width()).map(|position| self.symbol(position)).collect()
    }

    /// Returns true if every non-wildcard position of `self` equals the corresponding position of
    /// `term`.
    ///
    /// A wildcard in `term` is only matched by a wildcard in `self`.
    ///
    /// Panics if the widths differ.
    pub fn matches(&self, term: &Term) -> bool {
        self.assert_same_width(term);
        let care = !self.mask & full_mask(self.width());
        term.mask & care == 0 && (self.bits ^ term.bits) & care == 0
    }

    /// Returns true if this term matches the minterm `index`. Bits of `index` beyond the width are
    /// ignored.
    #[inline]
    pub fn matches_index(&self, index: u32) -> bool {
        (index & full_mask(self.width())) & !self.mask == self.bits
    }

    /// Returns the merged term if `self` and `other` differ in exactly one position, with that
    /// position replaced by a wildcard.
    ///
    /// A wildcard facing a literal counts as a difference that cannot be merged, so both terms
    /// must have their wildcards in the same positions.
    ///
    /// ```
    /// use qm_min::term::Term;
    ///
    /// let a: Term = "0-1".parse().unwrap();
    /// let b: Term = "0-0".parse().unwrap();
    /// assert_eq!(a.mergeable(&b), Some("0--".parse().unwrap()));
    ///
    /// let c: Term = "001".parse().unwrap();
    /// assert_eq!(a.mergeable(&c), None);
    /// ```
    ///
    /// Panics if the widths differ.
    pub fn mergeable(&self, other: &Term) -> Option<Term> {
        self.assert_same_width(other);
        if self.mask != other.mask {
            return None;
        }
        let diff = self.bits ^ other.bits;
        (diff.count_ones() == 1).then(|| Self {
            width: self.width,
            bits: self.bits & !diff,
            mask: self.mask | diff,
        })
    }

    /// Iterates over every minterm index this term represents, in increasing order.
    pub fn minterms(&self) -> Minterms {
        Minterms {
            bits: self.bits,
            mask: self.mask,
            next_sub: Some(0),
        }
    }

    #[inline]
    pub fn minterm_count(&self) -> u64 {
        1 << self.wildcard_count()
    }

    #[inline]
    fn assert_same_width(&self, other: &Term) {
        assert_eq!(
            self.width, other.width,
            "terms {} and {} must have the same width",
            self, other
        );
    }
}

#[inline]
fn full_mask(width: usize) -> u32 {
    if width == 0 {
        0
    } else {
        u32::MAX >> (MAX_WIDTH - width)
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.width.cmp(&other.width).then_with(|| {
            (0..self.width())
                .map(|position| self.symbol(position))
                .cmp((0..other.width()).map(|position| other.symbol(position)))
        })
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for symbol in self.symbols() {
            write!(f, "{}", symbol.to_char())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Term")
            .field(&format_args!("{}", self))
            .finish()
    }
}

impl FromStr for Term {
    type Err = TermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .chars()
            .enumerate()
            .map(|(position, symbol)| {
                Symbol::from_char(symbol).ok_or(TermError::InvalidSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_symbols(symbols)
    }
}

/// Iterator over the minterm indexes a [`Term`] represents.
#[derive(Clone, Debug)]
pub struct Minterms {
    bits: u32,
    mask: u32,
    next_sub: Option<u32>,
}

impl Iterator for Minterms {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let sub = self.next_sub?;
        // Steps through the subsets of `mask` in increasing order.
        self.next_sub = if sub == self.mask {
            None
        } else {
            Some(sub.wrapping_sub(self.mask) & self.mask)
        };
        Some(self.bits | sub)
    }
}
