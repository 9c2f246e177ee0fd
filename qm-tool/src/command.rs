// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    blif::{parse_blif, BlifFunction},
    pla::{parse_pla, write_pla},
};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use color_eyre::{
    eyre::{bail, WrapErr},
    Report, Result,
};
use std::{
    fs,
    io::{self, Write},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(name = "qm-tool", about = "Quine-McCluskey minimizer for single-output functions")]
pub struct QmToolApp {
    /// Log filter to use when RUST_LOG is not set
    #[clap(long, global = true, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    command: QmToolCommand,
}

#[derive(Debug, Parser)]
pub enum QmToolCommand {
    /// Minimize the function in a BLIF file
    Minimize {
        /// Input BLIF file
        input: Utf8PathBuf,

        /// Output file (stdout if not given)
        #[clap(long, short)]
        output: Option<Utf8PathBuf>,

        /// Output format
        #[clap(long, short, value_enum, default_value = "pla")]
        format: OutputFormat,
    },
    /// Check that a PLA cover implements the function in a BLIF file
    Check {
        /// Input BLIF file
        input: Utf8PathBuf,

        /// PLA file to check
        result: Utf8PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PLA with one product term per line
    Pla,
    /// Sum of products, such as `F = a'b + c`
    Algebraic,
}

impl QmToolApp {
    #[inline]
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl QmToolCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Minimize {
                input,
                output,
                format,
            } => {
                let blif = read_blif(&input)?;
                let rendered = minimize_to_string(&blif, format)
                    .wrap_err_with(|| format!("failed to minimize {}", input))?;
                match output {
                    Some(output) => fs::write(&output, rendered)
                        .wrap_err_with(|| format!("failed to write {}", output))?,
                    None => io::stdout().write_all(rendered.as_bytes())?,
                }
                Ok(())
            }
            Self::Check { input, result } => {
                let blif = read_blif(&input)?;
                let function = blif
                    .to_logic_function()
                    .wrap_err_with(|| format!("invalid function in {}", input))?;

                let text = fs::read_to_string(&result)
                    .wrap_err_with(|| format!("failed to read {}", result))?;
                let pla = parse_pla(&text).wrap_err_with(|| format!("failed to parse {}", result))?;
                if let Some(labels) = &pla.labels {
                    if labels != &blif.inputs {
                        warn!(?labels, inputs = ?blif.inputs, "PLA labels differ from BLIF inputs");
                    }
                }

                if let Err(mismatch) = pla.cover.check_cover_of(&function) {
                    bail!("{} does not implement {}: {}", result, input, mismatch);
                }
                println!("{}: ok ({} terms)", result, pla.cover.len());
                Ok(())
            }
        }
    }
}

/// Minimizes `blif` and renders the cover in `format`.
pub fn minimize_to_string(blif: &BlifFunction, format: OutputFormat) -> Result<String> {
    let cover = blif.to_logic_function()?.minimize()?;
    info!(
        inputs = blif.num_variables(),
        minterms = blif.minterms.len(),
        terms = cover.len(),
        "minimized function"
    );

    let mut out = Vec::new();
    match format {
        OutputFormat::Pla => write_pla(&mut out, &blif.inputs, blif.output_name(), &cover)?,
        OutputFormat::Algebraic => writeln!(
            out,
            "{} = {}",
            blif.output_name(),
            cover
                .algebraic_display()
                .with_labels(blif.inputs.iter().map(String::as_str))
        )?,
    }
    Ok(String::from_utf8(out)?)
}

fn read_blif(path: &Utf8Path) -> Result<BlifFunction> {
    let text = fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path))?;
    let blif = parse_blif(&text).wrap_err_with(|| format!("failed to parse {}", path))?;
    Ok(blif)
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, or by `default_filter` if it isn't set.
pub fn init_tracing_subscriber(default_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(Report::msg)
}
