//! Datetime serialization helpers.
//!
//! Timestamps travel and are stored as RFC3339 strings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Serializes `DateTime<Utc>` as an RFC3339 string.
pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(dt))
}

/// Deserializes `DateTime<Utc>` from an RFC3339 string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let s = String::deserialize(deserializer)?;
    parse(&s).ok_or_else(|| Error::custom(format!("Invalid RFC3339 timestamp: {s}")))
}

/// Formats a timestamp the way it is stored.
///
/// Fixed microsecond precision in UTC, so stored values sort as strings.
#[must_use]
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored RFC3339 timestamp.
#[must_use]
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
