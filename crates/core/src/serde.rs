//! Serde helper functions for request bodies and stored records.
//!
//! Request bodies come from browser forms and admin tooling, stored records
//! come from three different backends. These helpers smooth over the
//! differences in empty strings, scalar types and timestamp formats.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Renders a JSON scalar as text. `null` is `None`; arrays and objects are
/// rejected.
fn scalar_text<E: serde::de::Error>(value: Option<Value>) -> Result<Option<String>, E> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(E::custom(format!("expected a string, found {other}"))),
    }
}

/// Like [`deserialize_optional_string`], but numbers and booleans are
/// accepted and written out as text (`5551234` becomes `"5551234"`).
pub fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = scalar_text(Option::<Value>::deserialize(deserializer)?)?;
    Ok(text.filter(|s| !s.trim().is_empty()))
}

/// Deserialize a stored text field. `null` reads as an empty string and
/// scalars are written out as text.
pub fn deserialize_text_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = scalar_text(Option::<Value>::deserialize(deserializer)?)?;
    Ok(text.unwrap_or_default())
}

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use together with `#[serde(default)]`: an absent field stays `None`,
/// `null` becomes `Some(None)` and a value becomes `Some(Some(value))`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parses a timestamp in any of the formats the backends produce.
///
/// Accepts RFC 3339 with any offset, and naive `YYYY-MM-DDTHH:MM:SS[.fff]`
/// (or with a space separator) which is taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Formats a timestamp as RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `#[serde(with = "...")]` module for required `created_at` style fields.
pub mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

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
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}")))
    }
}

/// Deserialize an optional timestamp, treating empty strings as None.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {s}"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct OptionalFields {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        string_field: Option<String>,
        #[serde(default, deserialize_with = "deserialize_present")]
        image: Option<Option<String>>,
        #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
        created_at: Option<DateTime<Utc>>,
        #[serde(default, deserialize_with = "deserialize_optional_text")]
        phone: Option<String>,
        #[serde(default, deserialize_with = "deserialize_text_or_default")]
        note: String,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(with = "timestamp")]
        created_at: DateTime<Utc>,
    }

    #[test]
    fn test_deserialize_optional_string_empty() {
        let result: OptionalFields = serde_json::from_str(r#"{"string_field": "  "}"#).unwrap();
        assert_eq!(result.string_field, None);
    }

    #[test]
    fn test_deserialize_optional_string_value() {
        let result: OptionalFields = serde_json::from_str(r#"{"string_field": "hi"}"#).unwrap();
        assert_eq!(result.string_field, Some("hi".to_string()));
    }

    #[test]
    fn test_deserialize_optional_text_accepts_numbers() {
        let number: OptionalFields = serde_json::from_str(r#"{"phone": 5551234}"#).unwrap();
        assert_eq!(number.phone.as_deref(), Some("5551234"));

        let blank: OptionalFields = serde_json::from_str(r#"{"phone": " "}"#).unwrap();
        assert_eq!(blank.phone, None);

        let nested: Result<OptionalFields, _> = serde_json::from_str(r#"{"phone": [1]}"#);
        assert!(nested.is_err());
    }

    #[test]
    fn test_deserialize_text_or_default_reads_null_as_empty() {
        let null: OptionalFields = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(null.note, "");

        let missing: OptionalFields = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.note, "");

        let kept: OptionalFields = serde_json::from_str(r#"{"note": " spaced "}"#).unwrap();
        assert_eq!(kept.note, " spaced ");
    }

    #[test]
    fn test_deserialize_present_distinguishes_null_from_missing() {
        let missing: OptionalFields = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.image, None);

        let null: OptionalFields = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert_eq!(null.image, Some(None));

        let value: OptionalFields = serde_json::from_str(r#"{"image": "a.png"}"#).unwrap();
        assert_eq!(value.image, Some(Some("a.png".to_string())));
    }

    #[test]
    fn test_parse_timestamp_rfc3339_with_offset() {
        let parsed = parse_timestamp("2024-01-15T12:30:00.123+02:00").unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-01-15T10:30:00.123Z");
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let parsed = parse_timestamp("2024-01-15T10:30:00.123456").unwrap();
        assert_eq!(format_timestamp(&parsed), "2024-01-15T10:30:00.123Z");

        let spaced = parse_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(format_timestamp(&spaced), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_timestamp_module_serializes_millis_with_z() {
        let stamped = Stamped {
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
        };

        let json = serde_json::to_string(&stamped).unwrap();
        assert_eq!(json, r#"{"created_at":"2024-01-15T10:30:00.000Z"}"#);

        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stamped);
    }

    #[test]
    fn test_deserialize_optional_timestamp_invalid_is_error() {
        let result: Result<OptionalFields, _> =
            serde_json::from_str(r#"{"created_at": "not a date"}"#);
        assert!(result.is_err());
    }
}
