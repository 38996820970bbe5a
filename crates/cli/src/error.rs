/// Failure to obtain records from one input source.
///
/// Schema violations are not errors here; they are the checker's normal
/// output and live in [`crate::report::RecordOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("failed to read {name}: {error}")]
    Io {
        name: String,
        #[source]
        error: std::io::Error,
    },

    #[error("{name} is not valid JSON: {error}")]
    Json {
        name: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("{name} exceeds the {limit}-byte input limit")]
    TooLarge { name: String, limit: u64 },
}

impl CheckError {
    /// Name of the source that failed.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Io { name, .. } | Self::Json { name, .. } | Self::TooLarge { name, .. } => name,
        }
    }
}
