//! Date handling for task records.
//!
//! Clients send either a bare calendar day or a full timestamp. A task whose
//! date was never provided carries the unset sentinel `0001-01-01T00:00:00`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer};

/// The "not provided" marker for task dates.
pub fn unset_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or(NaiveDate::MIN)
        .and_time(NaiveTime::MIN)
}

pub fn is_unset_date(date: &NaiveDateTime) -> bool {
    *date == unset_date()
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.fff]` or an RFC 3339 timestamp.
/// Offsets are normalised to UTC and then dropped.
pub fn parse(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD or an ISO 8601 timestamp", raw))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    // An explicit null is the same as leaving the date out.
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse(&raw).map_err(serde::de::Error::custom),
        _ => Ok(unset_date()),
    }
}
