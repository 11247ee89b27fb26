//! Date formatting for query parameters, tables and exported reports.
//!
//! Report endpoints return dates as loosely formatted strings (RFC 3339,
//! `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD`), so the string helpers parse
//! leniently and fall back to the raw text when nothing matches.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::types::Timestamp;

/// Day granularity: `2024-05-01`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Second granularity: `2024-05-01 08:30:00`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_date(ts: &Timestamp) -> String {
    ts.format(DATE_FORMAT).to_string()
}

pub fn format_date_time(ts: &Timestamp) -> String {
    ts.format(DATE_TIME_FORMAT).to_string()
}

/// Parse a backend date string, keeping the wall-clock time it was sent with.
pub fn parse_lenient(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for fmt in [DATE_TIME_FORMAT, "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a backend timestamp. Strings without an offset keep their wall-clock
/// time and are tagged `+00:00`.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }
    parse_lenient(raw).map(|naive| naive.and_utc().fixed_offset())
}

/// `deserialize_with` helper for entity timestamps: `null`, missing or
/// unparseable values become `None` instead of failing the whole row.
pub fn deserialize_timestamp<'de, D>(de: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Render a backend date string at day granularity; empty stays empty.
pub fn format_date_str(raw: &str) -> String {
    match parse_lenient(raw) {
        Some(dt) => dt.format(DATE_FORMAT).to_string(),
        None => raw.trim().to_string(),
    }
}

/// Render a backend date string at second granularity; empty stays empty.
pub fn format_date_time_str(raw: &str) -> String {
    match parse_lenient(raw) {
        Some(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
        None => raw.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3339_keeps_server_wall_clock() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T08:30:15+08:00").unwrap();
        assert_eq!(format_date_time(&ts), "2024-05-01 08:30:15");
        assert_eq!(format_date(&ts), "2024-05-01");
    }

    #[test]
    fn lenient_accepts_space_separated_and_bare_dates() {
        assert_eq!(
            format_date_time_str("2024-05-01 08:30:15"),
            "2024-05-01 08:30:15"
        );
        assert_eq!(format_date_time_str("2024-05-01"), "2024-05-01 00:00:00");
        assert_eq!(format_date_str("2024-05-01T23:59:59Z"), "2024-05-01");
    }

    #[test]
    fn timestamps_without_offset_keep_their_wall_clock() {
        let ts = parse_timestamp("2024-04-30 08:00:00").unwrap();
        assert_eq!(format_date_time(&ts), "2024-04-30 08:00:00");
        let ts = parse_timestamp("2024-04-30T08:00:00+08:00").unwrap();
        assert_eq!(ts.offset().local_minus_utc(), 8 * 3600);
        assert_eq!(parse_timestamp("soon"), None);
    }

    #[test]
    fn deserialized_timestamps_tolerate_null_and_garbage() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_timestamp")]
            at: Option<Timestamp>,
        }

        let row: Row = serde_json::from_str(r#"{"at":"2024-04-30 08:00:00"}"#).unwrap();
        assert_eq!(row.at.map(|ts| format_date(&ts)).as_deref(), Some("2024-04-30"));
        let row: Row = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(row.at, None);
        let row: Row = serde_json::from_str(r#"{"at":"n/a"}"#).unwrap();
        assert_eq!(row.at, None);
        let row: Row = serde_json::from_str("{}").unwrap();
        assert_eq!(row.at, None);
    }

    #[test]
    fn empty_and_garbage_pass_through() {
        assert_eq!(format_date_str(""), "");
        assert_eq!(format_date_str("  "), "");
        assert_eq!(format_date_time_str("yesterday"), "yesterday");
    }
}
