use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Parse as naive UTC and convert, accepting RFC 3339 as well.
pub(crate) fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_sqlite_format() {
        let ts = parse_timestamp("2026-08-23 14:30:05");
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn parses_rfc3339() {
        let ts = parse_timestamp("2026-08-23T14:30:05Z");
        assert_eq!(ts.second(), 5);
    }

    #[test]
    fn corrupt_input_falls_back_to_epoch() {
        assert_eq!(parse_timestamp("not a date"), DateTime::<Utc>::default());
    }
}
