// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reader for the single-output subset of BLIF.

use qm_min::{
    errors::{MinimizeError, TermError},
    logic_function::LogicFunction,
    term::{Term, MAX_WIDTH},
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// A single-output function read from a BLIF model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlifFunction {
    pub model: Option<String>,
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub minterms: BTreeSet<u32>,
    pub dont_cares: BTreeSet<u32>,
}

impl BlifFunction {
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.inputs.len()
    }

    /// The output name, or `F` if none was declared.
    pub fn output_name(&self) -> &str {
        self.output.as_deref().unwrap_or("F")
    }

    pub fn to_logic_function(&self) -> Result<LogicFunction, MinimizeError> {
        LogicFunction::new(
            self.num_variables(),
            self.minterms.iter().copied(),
            self.dont_cares.iter().copied(),
        )
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BlifError {
    #[error("line {line}: cube row appears before .inputs")]
    MissingInputs { line: usize },

    #[error("line {line}: {count} inputs exceeds the maximum of {}", MAX_WIDTH)]
    TooManyInputs { line: usize, count: usize },

    #[error("line {line}: .inputs follows cube rows, which would change their encoding")]
    InputsAfterRows { line: usize },

    #[error("line {line}: more than one output declared")]
    MultipleOutputs { line: usize },

    #[error("line {line}: expected `<inputs> <output>`, found {text:?}")]
    MalformedRow { line: usize, text: String },

    #[error("line {line}: input plane has {actual} columns but {expected} inputs are declared")]
    PlaneWidthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}: invalid input plane")]
    InvalidPlane {
        line: usize,
        #[source]
        source: TermError,
    },

    #[error("line {line}: invalid output value {value:?}")]
    InvalidOutput { line: usize, value: String },
}

/// Parses a BLIF description of a single-output function.
///
/// Rows with output `1` add minterms and rows with output `-` add don't-cares; rows with output
/// `0` are ignored. A `-` in the input plane stands for both values, so such a row adds every
/// minterm it matches. `.inputs` may be repeated, but not after the first row.
pub fn parse_blif(text: &str) -> Result<BlifFunction, BlifError> {
    let mut function = BlifFunction::default();
    let mut saw_inputs = false;
    let mut saw_rows = false;

    for (line, content) in logical_lines(text) {
        let mut words = content.split_whitespace();
        let first = match words.next() {
            Some(first) => first,
            None => continue,
        };

        match first {
            ".model" => function.model = words.next().map(str::to_owned),
            ".inputs" => {
                if saw_rows {
                    return Err(BlifError::InputsAfterRows { line });
                }
                saw_inputs = true;
                function.inputs.extend(words.map(str::to_owned));
                if function.inputs.len() > MAX_WIDTH {
                    return Err(BlifError::TooManyInputs {
                        line,
                        count: function.inputs.len(),
                    });
                }
            }
            ".outputs" => {
                let outputs: Vec<_> = words.collect();
                if outputs.len() > 1 || (function.output.is_some() && !outputs.is_empty()) {
                    return Err(BlifError::MultipleOutputs { line });
                }
                if let Some(output) = outputs.first() {
                    function.output = Some(output.to_string());
                }
            }
            ".end" => break,
            directive if directive.starts_with('.') => {
                debug!(line, directive, "ignoring directive");
            }
            first => {
                let (plane, value) = match (words.next(), words.next()) {
                    (Some(_), None) if !saw_inputs => {
                        return Err(BlifError::MissingInputs { line })
                    }
                    (Some(value), None) => (first, value),
                    // A constant function has no input columns, with or without `.inputs`.
                    (None, None) if function.inputs.is_empty() => ("", first),
                    _ => {
                        return Err(BlifError::MalformedRow {
                            line,
                            text: content.trim().to_owned(),
                        })
                    }
                };
                add_row(&mut function, line, plane, value)?;
                saw_rows = true;
            }
        }
    }

    debug!(
        inputs = function.num_variables(),
        minterms = function.minterms.len(),
        dont_cares = function.dont_cares.len(),
        "parsed BLIF"
    );
    Ok(function)
}

fn add_row(
    function: &mut BlifFunction,
    line: usize,
    plane: &str,
    value: &str,
) -> Result<(), BlifError> {
    let expected = function.num_variables();
    let actual = plane.chars().count();
    if actual != expected {
        return Err(BlifError::PlaneWidthMismatch {
            line,
            expected,
            actual,
        });
    }
    let cube: Term = plane
        .parse()
        .map_err(|source| BlifError::InvalidPlane { line, source })?;

    let target = match value {
        "1" => &mut function.minterms,
        "-" => &mut function.dont_cares,
        "0" => return Ok(()),
        _ => {
            return Err(BlifError::InvalidOutput {
                line,
                value: value.to_owned(),
            })
        }
    };
    target.extend(cube.minterms());
    Ok(())
}

/// Yields `(line number, content)` pairs with comments stripped and `\` continuations joined. The
/// line number is that of the first physical line.
fn logical_lines(text: &str) -> impl Iterator<Item = (usize, String)> + '_ {
    let mut physical = text.lines().enumerate();
    std::iter::from_fn(move || {
        let (start_ix, first) = physical.next()?;
        let mut content = String::new();
        let mut current = first;
        loop {
            let stripped = match current.find('#') {
                Some(ix) => &current[..ix],
                None => current,
            };
            match stripped.trim_end().strip_suffix('\\') {
                Some(continued) => {
                    content.push_str(continued);
                    content.push(' ');
                    match physical.next() {
                        Some((_, next)) => current = next,
                        None => break,
                    }
                }
                None => {
                    content.push_str(stripped);
                    break;
                }
            }
        }
        Some((start_ix + 1, content))
    })
}
