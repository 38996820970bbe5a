//! Reading JSON records from files or stdin.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use serde_json::Value;

use crate::error::CheckError;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    /// Map command-line paths to sources. No paths means stdin; `-` also means stdin.
    pub fn from_args(paths: &[PathBuf]) -> Vec<Source> {
        if paths.is_empty() {
            return vec![Source::Stdin];
        }
        paths
            .iter()
            .map(|p| {
                if p.as_os_str() == "-" {
                    Source::Stdin
                } else {
                    Source::File(p.clone())
                }
            })
            .collect()
    }

    /// Read and parse every record in this source.
    pub fn read_records(&self, max_bytes: u64) -> Result<Vec<Value>, CheckError> {
        let name = self.to_string();
        match self {
            Source::Stdin => read_records(io::stdin().lock(), &name, max_bytes),
            Source::File(path) => {
                let file = File::open(path).map_err(|error| CheckError::Io {
                    name: name.clone(),
                    error,
                })?;
                read_records(file, &name, max_bytes)
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read at most `max_bytes` from `reader` and split the document into records.
///
/// A top-level array is a batch, one record per element. Anything else is a
/// single record, even if it is not an object; the schema reports that.
pub fn read_records<R: Read>(
    reader: R,
    name: &str,
    max_bytes: u64,
) -> Result<Vec<Value>, CheckError> {
    let mut buf = Vec::new();
    reader
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|error| CheckError::Io {
            name: name.to_string(),
            error,
        })?;

    if buf.len() as u64 > max_bytes {
        return Err(CheckError::TooLarge {
            name: name.to_string(),
            limit: max_bytes,
        });
    }

    let document: Value = serde_json::from_slice(&buf).map_err(|error| CheckError::Json {
        name: name.to_string(),
        error,
    })?;

    Ok(match document {
        Value::Array(records) => records,
        single => vec![single],
    })
}
