// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    logic_function::LogicFunction,
    term::{Symbol, Term},
};
use proptest::prelude::*;

/// Widths up to this are generated by default. Every index of the function is assigned a value,
/// so larger widths make exhaustive checks slow.
pub const DEFAULT_MAX_WIDTH: usize = 6;

impl Arbitrary for Term {
    /// Maximum width.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(max_width: Self::Parameters) -> Self::Strategy {
        let max_width = max_width.unwrap_or(DEFAULT_MAX_WIDTH);
        prop::collection::vec(any::<Option<bool>>(), 0..=max_width)
            .prop_map(|symbols| {
                Term::from_symbols(symbols.into_iter().map(Symbol::from))
                    .expect("width is bounded by max_width")
            })
            .boxed()
    }
}

impl Arbitrary for LogicFunction {
    /// Maximum number of variables.
    type Parameters = Option<usize>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(max_width: Self::Parameters) -> Self::Strategy {
        let max_width = max_width.unwrap_or(DEFAULT_MAX_WIDTH);
        // For each index: Some(true) is a minterm, None a don't-care, Some(false) the off-set.
        (0..=max_width)
            .prop_flat_map(|num_variables| {
                prop::collection::vec(any::<Option<bool>>(), 1_usize << num_variables)
            })
            .prop_map(|values| {
                let num_variables = values.len().trailing_zeros() as usize;
                let indexes_with = |value: Option<bool>| {
                    values
                        .iter()
                        .enumerate()
                        .filter(|(_, v)| **v == value)
                        .map(|(index, _)| index as u32)
                        .collect::<Vec<_>>()
                };
                LogicFunction::new(num_variables, indexes_with(Some(true)), indexes_with(None))
                    .expect("generated indexes are in range and disjoint")
            })
            .boxed()
    }
}
