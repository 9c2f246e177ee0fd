// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line front end for `qm-min`: reads BLIF, writes PLA or algebraic covers.

pub mod blif;
pub mod command;
pub mod pla;

pub use command::QmToolApp;
