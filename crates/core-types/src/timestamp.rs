//! Serde helpers for backend timestamps.
//!
//! The prediction service emits `isoformat()` strings, which carry no offset
//! (`2024-03-01T09:15:00.123456`). Offset-less values are read as UTC; RFC 3339
//! values are converted to UTC. Serialization always writes RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_offsetless_isoformat_as_utc() {
        let parsed = parse("2024-03-01T09:15:00.250000").unwrap();
        assert_eq!(
            parsed.timestamp_millis(),
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap().timestamp_millis() + 250
        );
    }

    #[test]
    fn converts_rfc3339_offsets() {
        let parsed = parse("2024-03-01T14:45:00+05:30").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 9, 15, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
