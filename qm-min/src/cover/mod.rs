// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod cover_impl;
mod display;
mod select;

pub use cover_impl::*;
pub use display::*;
pub use select::*;
