use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde_json::Value;
use songbook_shared::{validate_profile, validate_song, ValidationError};

/// Validate profile or song records stored as JSON.
#[derive(Parser, Debug)]
#[command(name = "songbook-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schema to validate against
    #[arg(value_enum)]
    pub kind: RecordKind,

    /// JSON files holding one record or an array of records (default: stdin)
    pub paths: Vec<PathBuf>,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Maximum bytes read from any one source (overrides SONGBOOK_MAX_INPUT_BYTES)
    #[arg(long)]
    pub max_bytes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Profile,
    Song,
}

impl RecordKind {
    /// Run the matching schema, discarding the typed value.
    pub fn validate(&self, record: &Value) -> Result<(), ValidationError> {
        match self {
            Self::Profile => validate_profile(record).map(|_| ()),
            Self::Song => validate_song(record).map(|_| ()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Song => "song",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_kind_paths_and_flags() {
        let cli = Cli::parse_from([
            "songbook-check",
            "song",
            "a.json",
            "b.json",
            "--format",
            "json",
            "--max-bytes",
            "512",
        ]);
        assert_eq!(cli.kind, RecordKind::Song);
        assert_eq!(cli.paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.max_bytes, Some(512));
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["songbook-check", "album"]).is_err());
    }
}
