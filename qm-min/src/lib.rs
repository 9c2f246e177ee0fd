// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-level minimization of single-output boolean functions with the Quine-McCluskey method.
//!
//! ```
//! use qm_min::logic_function::LogicFunction;
//!
//! // f = m(4, 8, 10, 11, 12, 15) + d(9, 14)
//! let function = LogicFunction::new(4, [4, 8, 10, 11, 12, 15], [9, 14]).unwrap();
//! let cover = function.minimize().unwrap();
//! assert_eq!(cover.algebraic_display().to_string(), "ab' + ac + bc'd'");
//! ```

pub mod cover;
pub mod coverage;
pub mod errors;
pub mod logic_function;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod term;

pub use logic_function::minimize;
