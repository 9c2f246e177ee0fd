// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writer and reader for single-output PLA files of type `f`.

use itertools::Itertools;
use qm_min::{
    cover::Cover,
    errors::TermError,
    term::{Term, MAX_WIDTH},
};
use std::io;
use thiserror::Error;

/// Writes `cover` as a PLA with one output.
///
/// `labels` name the inputs, most-significant first, and must match the cover width.
pub fn write_pla<W: io::Write>(
    writer: &mut W,
    labels: &[String],
    output_name: &str,
    cover: &Cover,
) -> io::Result<()> {
    assert_eq!(
        labels.len(),
        cover.width(),
        "label count must match cover width"
    );
    writeln!(writer, ".i {}", cover.width())?;
    writeln!(writer, ".o 1")?;
    if !labels.is_empty() {
        writeln!(writer, ".ilb {}", labels.iter().join(" "))?;
    }
    writeln!(writer, ".ob {}", output_name)?;
    writeln!(writer, ".p {}", cover.len())?;
    for term in cover {
        writeln!(writer, "{} 1", term)?;
    }
    writeln!(writer, ".e")
}

/// The on-set cover of a PLA file, with its labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaCover {
    pub labels: Option<Vec<String>>,
    pub output_name: Option<String>,
    pub cover: Cover,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PlaError {
    #[error("missing .i directive")]
    MissingInputDirective,

    #[error("line {line}: invalid .{directive} value {value:?}")]
    InvalidDirective {
        line: usize,
        directive: &'static str,
        value: String,
    },

    #[error("line {line}: only single-output PLAs are supported, found .o {count}")]
    MultipleOutputs { line: usize, count: usize },

    #[error("line {line}: expected {expected} input columns, found {actual}")]
    WidthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: expected `<inputs> <output>`, found {text:?}")]
    MalformedRow { line: usize, text: String },

    #[error("line {line}: invalid input plane")]
    InvalidPlane {
        line: usize,
        #[source]
        source: TermError,
    },
}

/// Parses the on-set of a PLA file, as produced by [`write_pla`].
///
/// Rows whose output is not `1` are skipped.
pub fn parse_pla(text: &str) -> Result<PlaCover, PlaError> {
    let mut width = None;
    let mut labels = None;
    let mut output_name = None;
    let mut terms = Vec::new();

    for (line_ix, content) in text.lines().enumerate() {
        let line = line_ix + 1;
        let content = match content.find('#') {
            Some(ix) => &content[..ix],
            None => content,
        };
        let mut words = content.split_whitespace();
        let first = match words.next() {
            Some(first) => first,
            None => continue,
        };

        match first {
            ".i" => {
                let value = words.next().unwrap_or("");
                let parsed = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n <= MAX_WIDTH)
                    .ok_or_else(|| PlaError::InvalidDirective {
                        line,
                        directive: "i",
                        value: value.to_owned(),
                    })?;
                width = Some(parsed);
            }
            ".o" => {
                let value = words.next().unwrap_or("");
                match value.parse::<usize>() {
                    Ok(1) => {}
                    Ok(count) => return Err(PlaError::MultipleOutputs { line, count }),
                    Err(_) => {
                        return Err(PlaError::InvalidDirective {
                            line,
                            directive: "o",
                            value: value.to_owned(),
                        })
                    }
                }
            }
            ".ilb" => labels = Some(words.map(str::to_owned).collect::<Vec<_>>()),
            ".ob" => output_name = words.next().map(str::to_owned),
            ".e" | ".end" => break,
            directive if directive.starts_with('.') => {}
            first => {
                let expected = width.ok_or(PlaError::MissingInputDirective)?;
                let (plane, value) = match (words.next(), words.next()) {
                    (Some(value), None) => (first, value),
                    // With no inputs the row is just the output value.
                    (None, None) if expected == 0 => ("", first),
                    _ => {
                        return Err(PlaError::MalformedRow {
                            line,
                            text: content.trim().to_owned(),
                        })
                    }
                };
                let actual = plane.chars().count();
                if actual != expected {
                    return Err(PlaError::WidthMismatch {
                        line,
                        expected,
                        actual,
                    });
                }
                let term: Term = plane
                    .parse()
                    .map_err(|source| PlaError::InvalidPlane { line, source })?;
                if value == "1" {
                    terms.push(term);
                }
            }
        }
    }

    let width = width.ok_or(PlaError::MissingInputDirective)?;
    Ok(PlaCover {
        labels,
        output_name,
        cover: Cover::new(width, terms),
    })
}
