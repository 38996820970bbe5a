use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamps travel as strings; the schema does not constrain their format.
/// By convention they are RFC 3339 / ISO-8601 in UTC.
pub type Timestamp = String;

/// Interpret a timestamp string as RFC 3339, normalised to UTC.
///
/// Returns `None` for strings that do not parse. That is not a validation
/// failure: the schema only requires "a string".
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The current time as an RFC 3339 string with second precision and a `Z` suffix.
pub fn now_timestamp() -> Timestamp {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_zulu_timestamp() {
        let parsed = parse_timestamp("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn normalises_offsets_to_utc() {
        let parsed = parse_timestamp("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn non_rfc3339_is_none() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn now_round_trips() {
        let now = now_timestamp();
        assert!(now.ends_with('Z'));
        assert!(parse_timestamp(&now).is_some());
    }
}
