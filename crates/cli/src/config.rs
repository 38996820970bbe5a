/// Default cap on the size of one input source (10 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Log output format for the stderr subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Parse `text` / `json`, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Checker configuration loaded from environment variables.
///
/// Command-line flags override these values.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Log output format (default: `text`).
    pub log_format: LogFormat,
    /// Maximum bytes read from any one input source (default: 10 MiB).
    pub max_input_bytes: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl CheckConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default    |
    /// |----------------------------|------------|
    /// | `SONGBOOK_LOG_FORMAT`      | `text`     |
    /// | `SONGBOOK_MAX_INPUT_BYTES` | `10485760` |
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let log_format = lookup("SONGBOOK_LOG_FORMAT")
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or(defaults.log_format);

        let max_input_bytes = lookup("SONGBOOK_MAX_INPUT_BYTES")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &u64| n > 0)
            .unwrap_or(defaults.max_input_bytes);

        Self {
            log_format,
            max_input_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = CheckConfig::from_lookup(lookup(&[]));
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn reads_overrides() {
        let config = CheckConfig::from_lookup(lookup(&[
            ("SONGBOOK_LOG_FORMAT", "JSON"),
            ("SONGBOOK_MAX_INPUT_BYTES", "2048"),
        ]));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_input_bytes, 2048);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = CheckConfig::from_lookup(lookup(&[
            ("SONGBOOK_LOG_FORMAT", "xml"),
            ("SONGBOOK_MAX_INPUT_BYTES", "lots"),
        ]));
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);

        let zero = CheckConfig::from_lookup(lookup(&[("SONGBOOK_MAX_INPUT_BYTES", "0")]));
        assert_eq!(zero.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }
}
