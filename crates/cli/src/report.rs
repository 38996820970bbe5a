//! Per-record outcomes and the run summary.

use std::io::{self, Write};

use serde::Serialize;
use songbook_shared::{FieldViolation, ValidationError};

use crate::cli::OutputFormat;

/// Exit status when every record validated.
pub const EXIT_OK: u8 = 0;
/// Exit status when at least one record failed validation.
pub const EXIT_INVALID: u8 = 1;
/// Exit status when a source could not be read or parsed.
pub const EXIT_INPUT_ERROR: u8 = 2;

/// Result of validating one record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordOutcome {
    pub source: String,
    pub index: usize,
    pub valid: bool,
    pub violations: Vec<FieldViolation>,
}

impl RecordOutcome {
    pub fn new(source: &str, index: usize, result: Result<(), ValidationError>) -> Self {
        let violations = match result {
            Ok(()) => Vec::new(),
            Err(err) => err.violations,
        };
        Self {
            source: source.to_string(),
            index,
            valid: violations.is_empty(),
            violations,
        }
    }

    /// Write this outcome in the requested format.
    pub fn write_to(&self, out: &mut impl Write, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => {
                if self.valid {
                    writeln!(out, "{}[{}]: ok", self.source, self.index)
                } else {
                    writeln!(
                        out,
                        "{}[{}]: {} violation(s)",
                        self.source,
                        self.index,
                        self.violations.len()
                    )?;
                    for v in &self.violations {
                        writeln!(out, "  {v}")?;
                    }
                    Ok(())
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, self).map_err(io::Error::from)?;
                writeln!(out)
            }
        }
    }
}

/// Totals across every source in one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub records: usize,
    pub invalid: usize,
    pub input_errors: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &RecordOutcome) {
        self.records += 1;
        if !outcome.valid {
            self.invalid += 1;
        }
    }

    /// Input errors take precedence over schema violations.
    pub fn exit_code(&self) -> u8 {
        if self.input_errors > 0 {
            EXIT_INPUT_ERROR
        } else if self.invalid > 0 {
            EXIT_INVALID
        } else {
            EXIT_OK
        }
    }
}
