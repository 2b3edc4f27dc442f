//! Serde helpers for backend timestamps.
//!
//! The catalog backend emits `created_at` either as RFC 3339 with an offset or as a
//! naive ISO-8601 string without one. Naive values are taken to be UTC.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Parses a backend timestamp string.
///
/// # Examples
///
/// ```
/// use marquee::domain::timestamp::parse;
///
/// assert!(parse("2024-03-01T12:30:00Z").is_some());
/// assert!(parse("2024-03-01T12:30:00.123456").is_some());
/// assert!(parse("yesterday").is_none());
/// ```
#[must_use]
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Serializes as RFC 3339.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// Deserializes either timestamp flavour.
///
/// # Errors
///
/// Fails when the string matches neither format.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}
