//! The check loop: read each source, validate each record, report.

use std::io::{self, Write};

use serde_json::json;

use crate::cli::{OutputFormat, RecordKind};
use crate::error::CheckError;
use crate::input::Source;
use crate::report::{RecordOutcome, Summary};

/// Options for one run, after merging flags over environment config.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    pub kind: RecordKind,
    pub format: OutputFormat,
    pub max_input_bytes: u64,
}

/// Validate every record in every source, writing one report entry per
/// record (or per unreadable source) to `out`.
///
/// A bad source never stops the run; later sources are still checked.
pub fn run(sources: &[Source], options: CheckOptions, out: &mut impl Write) -> io::Result<Summary> {
    let mut summary = Summary::default();

    for source in sources {
        match source.read_records(options.max_input_bytes) {
            Ok(records) => {
                tracing::info!(
                    source = %source,
                    records = records.len(),
                    kind = options.kind.as_str(),
                    "Checking source",
                );
                check_records(source, &records, options, out, &mut summary)?;
            }
            Err(err) => {
                tracing::error!(source = %source, error = %err, "Failed to load source");
                summary.input_errors += 1;
                write_input_error(&err, options.format, out)?;
            }
        }
    }

    tracing::info!(
        records = summary.records,
        invalid = summary.invalid,
        input_errors = summary.input_errors,
        "Check complete",
    );
    Ok(summary)
}

fn check_records(
    source: &Source,
    records: &[serde_json::Value],
    options: CheckOptions,
    out: &mut impl Write,
    summary: &mut Summary,
) -> io::Result<()> {
    let name = source.to_string();
    for (index, record) in records.iter().enumerate() {
        let outcome = RecordOutcome::new(&name, index, options.kind.validate(record));
        if !outcome.valid {
            tracing::debug!(
                source = %name,
                index,
                violations = outcome.violations.len(),
                "Record failed validation",
            );
        }
        summary.record(&outcome);
        outcome.write_to(out, options.format)?;
    }
    Ok(())
}

fn write_input_error(err: &CheckError, format: OutputFormat, out: &mut impl Write) -> io::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}: error: {err}", err.source_name()),
        OutputFormat::Json => {
            let entry = json!({
                "source": err.source_name(),
                "error": err.to_string(),
            });
            writeln!(out, "{entry}")
        }
    }
}
