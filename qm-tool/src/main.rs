// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use qm_tool::{command::init_tracing_subscriber, QmToolApp};

fn main() -> Result<()> {
    color_eyre::install()?;
    let app = QmToolApp::parse();
    init_tracing_subscriber(app.log_level())?;
    app.exec()
}
