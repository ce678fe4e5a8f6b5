//! Backend timestamps.
//!
//! The API writes naive UTC timestamps (`2024-03-15T14:02:26.123456`) without
//! an offset. RFC 3339 values with `Z` or an explicit offset are accepted too.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .replacen(' ', "T", 1)
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub mod required {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s)))
    }
}

/// Nullable timestamps; pair with `#[serde(default)]` so absent fields decode too
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::format_timestamp(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse_timestamp(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "required")]
        at: DateTime<Utc>,
        #[serde(default, with = "optional")]
        maybe: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_naive_timestamp_is_utc() {
        let dt = parse_timestamp("2024-03-15T14:02:26.123456").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 2, 26));

        let spaced = parse_timestamp("2024-03-15 14:02:26").unwrap();
        assert_eq!(spaced.day(), 15);
        assert_eq!(spaced.hour(), 14);
    }

    #[test]
    fn test_offset_timestamps_are_converted() {
        let zulu = parse_timestamp("2024-03-15T14:02:26Z").unwrap();
        let offset = parse_timestamp("2024-03-15T16:02:26+02:00").unwrap();
        assert_eq!(zulu, offset);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_optional_field_null_or_missing() {
        let with_null: Stamped =
            serde_json::from_str(r#"{"at":"2024-03-15T14:02:26","maybe":null}"#).unwrap();
        assert!(with_null.maybe.is_none());

        let missing: Stamped = serde_json::from_str(r#"{"at":"2024-03-15T14:02:26"}"#).unwrap();
        assert!(missing.maybe.is_none());

        assert!(serde_json::from_str::<Stamped>(r#"{"at":"soon"}"#).is_err());
    }

    #[test]
    fn test_serializes_with_zulu_suffix() {
        let stamped = Stamped {
            at: parse_timestamp("2024-03-15T14:02:26").unwrap(),
            maybe: None,
        };
        let json = serde_json::to_value(&stamped).unwrap();
        assert_eq!(json["at"], "2024-03-15T14:02:26.000Z");
        assert!(json["maybe"].is_null());
    }
}
