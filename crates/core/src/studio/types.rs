use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Category given to photos submitted without one.
pub const DEFAULT_CATEGORY: &str = "Portrait";

/// Name shown when the profile has none.
pub const DEFAULT_PROFILE_NAME: &str = "Roop";

/// Title shown when the profile has none.
pub const DEFAULT_PROFILE_TITLE: &str = "Professional Photographer & Visual Storyteller";

/// Opaque identifier of a stored record.
///
/// Backends use different native keys (ObjectIds, table integers, Unix
/// millisecond timestamps). All of them are carried as strings and compared
/// by exact string equality. JSON numbers are accepted on input and always
/// written back as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
            Float(f64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Ok(Self(s)),
            RawId::Signed(n) => Ok(Self(n.to_string())),
            RawId::Unsigned(n) => Ok(Self(n.to_string())),
            RawId::Float(f) if f.fract() == 0.0 && f.is_finite() => {
                Ok(Self(format!("{}", f as i64)))
            }
            RawId::Float(f) => Err(serde::de::Error::custom(format!(
                "record id must be an integer or string, got {f}"
            ))),
        }
    }
}

/// Common accessors for records kept in lists.
pub trait Record {
    fn id(&self) -> &RecordId;
    fn created_at(&self) -> DateTime<Utc>;
}

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: RecordId,
    #[serde(default, deserialize_with = "crate::serde::deserialize_text_or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::serde::deserialize_text_or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "crate::serde::deserialize_text_or_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "crate::serde::deserialize_text_or_default")]
    pub message: String,
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Record for ContactMessage {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A validated contact message that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NewContactMessage {
    /// Attaches the id a backend assigned.
    pub fn to_message(&self, id: RecordId) -> ContactMessage {
        ContactMessage {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            created_at: self.created_at,
        }
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// A gallery photo.
///
/// `url` is either a public object-storage URL or a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: RecordId,
    pub url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(with = "crate::serde::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Record for Photo {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A validated photo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl NewPhoto {
    /// Attaches the id a backend assigned.
    pub fn to_photo(&self, id: RecordId) -> Photo {
        Photo {
            id,
            url: self.url.clone(),
            category: self.category.clone(),
            created_at: self.created_at,
        }
    }
}

/// The studio profile as served to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub profile_image: Option<String>,
    pub name: String,
    pub title: String,
    pub bio: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            profile_image: None,
            name: DEFAULT_PROFILE_NAME.to_string(),
            title: DEFAULT_PROFILE_TITLE.to_string(),
            bio: Vec::new(),
        }
    }
}

/// The profile exactly as a store holds it; any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredProfile {
    pub profile_image: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<Vec<String>>,
}

impl StoredProfile {
    /// Fills missing or empty fields with the defaults.
    pub fn into_profile(self) -> Profile {
        let defaults = Profile::default();
        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Profile {
            profile_image: non_empty(self.profile_image),
            name: non_empty(self.name).unwrap_or(defaults.name),
            title: non_empty(self.title).unwrap_or(defaults.title),
            bio: self.bio.unwrap_or(defaults.bio),
        }
    }
}

/// A partial profile write. Only `Some` fields are written.
///
/// `profile_image: Some(None)` clears the stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub profile_image: Option<Option<String>>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub bio: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let from_number: RecordId = serde_json::from_str("1700000000000").unwrap();
        let from_string: RecordId = serde_json::from_str(r#""1700000000000""#).unwrap();
        let from_float: RecordId = serde_json::from_str("42.0").unwrap();

        assert_eq!(from_number, from_string);
        assert_eq!(from_float.as_str(), "42");
        assert!(serde_json::from_str::<RecordId>("4.5").is_err());
    }

    #[test]
    fn test_record_id_serializes_as_string() {
        let id = RecordId::from(1_700_000_000_000_i64);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""1700000000000""#);
    }

    #[test]
    fn test_legacy_local_message_with_numeric_id() {
        let json = r#"{
            "id": 1700000000000,
            "name": "A",
            "email": "a@x.com",
            "message": "hi",
            "created_at": "2024-01-15T10:30:00.000Z"
        }"#;

        let message: ContactMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.id.as_str(), "1700000000000");
        assert_eq!(message.phone, "");
        assert_eq!(message.created_at, sample_time());
    }

    #[test]
    fn test_legacy_message_with_null_and_numeric_fields() {
        let json = r#"{
            "id": "m1",
            "name": "Old",
            "email": "old@x.com",
            "phone": null,
            "message": 42,
            "created_at": "2024-01-15T10:30:00.000Z"
        }"#;

        let message: ContactMessage = serde_json::from_str(json).unwrap();

        assert_eq!(message.phone, "");
        assert_eq!(message.message, "42");
    }

    #[test]
    fn test_photo_defaults_category() {
        let json = r#"{"id": "p1", "url": "https://x/y.jpg", "created_at": "2024-01-15T10:30:00Z"}"#;
        let photo: Photo = serde_json::from_str(json).unwrap();
        assert_eq!(photo.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_new_message_to_message_keeps_fields() {
        let new = NewContactMessage {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: "555".to_string(),
            message: "hi".to_string(),
            created_at: sample_time(),
        };

        let message = new.to_message(RecordId::new("abc"));

        assert_eq!(message.id.as_str(), "abc");
        assert_eq!(message.name, "A");
        assert_eq!(message.created_at, sample_time());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let json = serde_json::to_value(Profile::default()).unwrap();

        assert_eq!(json["profileImage"], serde_json::Value::Null);
        assert_eq!(json["name"], DEFAULT_PROFILE_NAME);
        assert_eq!(json["title"], DEFAULT_PROFILE_TITLE);
        assert_eq!(json["bio"], serde_json::json!([]));
    }

    #[test]
    fn test_stored_profile_applies_defaults_for_empty_fields() {
        let stored = StoredProfile {
            profile_image: Some(String::new()),
            name: Some(String::new()),
            title: None,
            bio: Some(vec!["Hello".to_string()]),
        };

        let profile = stored.into_profile();

        assert_eq!(profile.profile_image, None);
        assert_eq!(profile.name, DEFAULT_PROFILE_NAME);
        assert_eq!(profile.title, DEFAULT_PROFILE_TITLE);
        assert_eq!(profile.bio, vec!["Hello".to_string()]);
    }

    #[test]
    fn test_stored_profile_keeps_values() {
        let stored = StoredProfile {
            profile_image: Some("data:image/png;base64,AA==".to_string()),
            name: Some("New Name".to_string()),
            title: Some("Portraits".to_string()),
            bio: None,
        };

        let profile = stored.into_profile();

        assert_eq!(profile.name, "New Name");
        assert_eq!(profile.title, "Portraits");
        assert!(profile.bio.is_empty());
        assert!(profile.profile_image.is_some());
    }
}
