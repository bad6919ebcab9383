//! Document conversion functions.
//!
//! Pure functions between BSON documents and domain types, testable without
//! a running server.

use chrono::{DateTime, Utc};
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

use roopsnap_core::serde::{format_timestamp, parse_timestamp};
use roopsnap_core::storage::{RepositoryError, Result};
use roopsnap_core::studio::{
    ContactMessage, NewContactMessage, NewPhoto, Photo, ProfileUpdate, RecordId, StoredProfile,
    DEFAULT_CATEGORY,
};

// ============================================================================
// Field helpers
// ============================================================================

/// Canonical id of a document's `_id`, whatever BSON type it has.
pub fn bson_to_record_id(value: &Bson) -> Result<RecordId> {
    match value {
        Bson::ObjectId(oid) => Ok(RecordId::new(oid.to_hex())),
        Bson::String(s) => Ok(RecordId::new(s.clone())),
        Bson::Int32(n) => Ok(RecordId::from(i64::from(*n))),
        Bson::Int64(n) => Ok(RecordId::from(*n)),
        Bson::Double(f) if f.fract() == 0.0 && f.is_finite() => Ok(RecordId::from(*f as i64)),
        other => Err(RepositoryError::InvalidData(format!(
            "unsupported _id type: {other}"
        ))),
    }
}

/// Filters that may match a record id, in the order they should be tried.
///
/// A valid ObjectId hex string is tried as an ObjectId first and then as a
/// plain string; anything else only as a string.
pub fn id_filters(id: &RecordId) -> Vec<Document> {
    let mut filters = Vec::with_capacity(2);
    if let Ok(oid) = ObjectId::parse_str(id.as_str()) {
        filters.push(doc! { "_id": oid });
    }
    filters.push(doc! { "_id": id.as_str() });
    filters
}

fn string_field(doc: &Document, key: &str) -> Option<String> {
    match doc.get(key) {
        Some(Bson::String(s)) => Some(s.clone()),
        _ => None,
    }
}

fn id_field(doc: &Document) -> Result<RecordId> {
    let id = doc
        .get("_id")
        .ok_or_else(|| RepositoryError::InvalidData("document has no _id".to_string()))?;
    bson_to_record_id(id)
}

fn timestamp_field(doc: &Document, key: &str) -> Result<DateTime<Utc>> {
    match doc.get(key) {
        Some(Bson::String(s)) => parse_timestamp(s).ok_or_else(|| {
            RepositoryError::InvalidData(format!("{key} is not a timestamp: {s}"))
        }),
        Some(Bson::DateTime(dt)) => DateTime::from_timestamp_millis(dt.timestamp_millis())
            .ok_or_else(|| RepositoryError::InvalidData(format!("{key} is out of range"))),
        Some(other) => Err(RepositoryError::InvalidData(format!(
            "{key} has unsupported type: {other}"
        ))),
        None => Err(RepositoryError::InvalidData(format!("missing field: {key}"))),
    }
}

// ============================================================================
// Message conversions
// ============================================================================

/// Convert a new message to the document to insert.
pub fn message_to_document(message: &NewContactMessage) -> Document {
    doc! {
        "name": message.name.as_str(),
        "email": message.email.as_str(),
        "phone": message.phone.as_str(),
        "message": message.message.as_str(),
        "created_at": format_timestamp(&message.created_at),
    }
}

/// Convert a stored document to a message.
pub fn document_to_message(doc: &Document) -> Result<ContactMessage> {
    Ok(ContactMessage {
        id: id_field(doc)?,
        name: string_field(doc, "name").unwrap_or_default(),
        email: string_field(doc, "email").unwrap_or_default(),
        phone: string_field(doc, "phone").unwrap_or_default(),
        message: string_field(doc, "message").unwrap_or_default(),
        created_at: timestamp_field(doc, "created_at")?,
    })
}

// ============================================================================
// Photo conversions
// ============================================================================

/// Convert a new photo to the document to insert.
pub fn photo_to_document(photo: &NewPhoto) -> Document {
    doc! {
        "url": photo.url.as_str(),
        "category": photo.category.as_str(),
        "created_at": format_timestamp(&photo.created_at),
    }
}

/// Convert a stored document to a photo.
pub fn document_to_photo(doc: &Document) -> Result<Photo> {
    let url = string_field(doc, "url")
        .ok_or_else(|| RepositoryError::InvalidData("missing field: url".to_string()))?;

    Ok(Photo {
        id: id_field(doc)?,
        url,
        category: string_field(doc, "category")
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        created_at: timestamp_field(doc, "created_at")?,
    })
}

// ============================================================================
// Profile conversions
// ============================================================================

/// Convert the profile document. Fields of the wrong type read as missing.
pub fn document_to_profile(doc: &Document) -> StoredProfile {
    let bio = match doc.get("bio") {
        Some(Bson::Array(items)) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    };

    StoredProfile {
        profile_image: string_field(doc, "profileImage"),
        name: string_field(doc, "name"),
        title: string_field(doc, "title"),
        bio,
    }
}

/// Build the `$set` update for a profile write.
pub fn profile_update_document(update: &ProfileUpdate) -> Document {
    let mut fields = Document::new();

    if let Some(image) = &update.profile_image {
        match image {
            Some(image) => fields.insert("profileImage", image.as_str()),
            None => fields.insert("profileImage", Bson::Null),
        };
    }
    if let Some(name) = &update.name {
        fields.insert("name", name.as_str());
    }
    if let Some(title) = &update.title {
        fields.insert("title", title.as_str());
    }
    if let Some(bio) = &update.bio {
        fields.insert("bio", bio.clone());
    }
    fields.insert("updated_at", format_timestamp(&update.updated_at));

    doc! { "$set": fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_bson_to_record_id() {
        let oid = ObjectId::parse_str("65a5077c1f4e3a2b8c9d0e1f").unwrap();

        assert_eq!(
            bson_to_record_id(&Bson::ObjectId(oid)).unwrap().as_str(),
            "65a5077c1f4e3a2b8c9d0e1f"
        );
        assert_eq!(
            bson_to_record_id(&Bson::String("legacy".to_string()))
                .unwrap()
                .as_str(),
            "legacy"
        );
        assert_eq!(
            bson_to_record_id(&Bson::Int64(1_700_000_000_000))
                .unwrap()
                .as_str(),
            "1700000000000"
        );
        assert!(bson_to_record_id(&Bson::Boolean(true)).is_err());
    }

    #[test]
    fn test_id_filters_for_object_id() {
        let filters = id_filters(&RecordId::new("65a5077c1f4e3a2b8c9d0e1f"));

        assert_eq!(filters.len(), 2);
        assert!(matches!(filters[0].get("_id"), Some(Bson::ObjectId(_))));
        assert_eq!(
            filters[1].get_str("_id").unwrap(),
            "65a5077c1f4e3a2b8c9d0e1f"
        );
    }

    #[test]
    fn test_id_filters_for_plain_string() {
        let filters = id_filters(&RecordId::new("1700000000000"));

        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].get_str("_id").unwrap(), "1700000000000");
    }

    #[test]
    fn test_message_round_trip() {
        let new = NewContactMessage {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            phone: String::new(),
            message: "hi".to_string(),
            created_at: sample_time(),
        };

        let mut doc = message_to_document(&new);
        assert_eq!(doc.get_str("created_at").unwrap(), "2024-01-15T10:30:00.000Z");

        doc.insert("_id", ObjectId::parse_str("65a5077c1f4e3a2b8c9d0e1f").unwrap());
        let message = document_to_message(&doc).unwrap();

        assert_eq!(message, new.to_message(RecordId::new("65a5077c1f4e3a2b8c9d0e1f")));
    }

    #[test]
    fn test_document_to_photo_accepts_bson_dates_and_defaults_category() {
        let created = mongodb::bson::DateTime::from_millis(sample_time().timestamp_millis());
        let doc = doc! {
            "_id": "p1",
            "url": "https://cdn/a.jpg",
            "created_at": created,
        };

        let photo = document_to_photo(&doc).unwrap();

        assert_eq!(photo.id.as_str(), "p1");
        assert_eq!(photo.category, DEFAULT_CATEGORY);
        assert_eq!(photo.created_at, sample_time());
    }

    #[test]
    fn test_document_to_photo_requires_url() {
        let doc = doc! { "_id": "p1", "created_at": "2024-01-15T10:30:00Z" };

        assert!(matches!(
            document_to_photo(&doc),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_document_to_profile() {
        let doc = doc! {
            "profileImage": Bson::Null,
            "name": "New Name",
            "bio": ["First", "Second"],
        };

        let profile = document_to_profile(&doc);

        assert_eq!(profile.profile_image, None);
        assert_eq!(profile.name.as_deref(), Some("New Name"));
        assert_eq!(profile.title, None);
        assert_eq!(
            profile.bio,
            Some(vec!["First".to_string(), "Second".to_string()])
        );
    }

    #[test]
    fn test_profile_update_sets_only_supplied_fields() {
        let update = ProfileUpdate {
            profile_image: Some(None),
            name: Some("New Name".to_string()),
            title: None,
            bio: None,
            updated_at: sample_time(),
        };

        let doc = profile_update_document(&update);
        let fields = doc.get_document("$set").unwrap();

        assert_eq!(fields.get("profileImage"), Some(&Bson::Null));
        assert_eq!(fields.get_str("name").unwrap(), "New Name");
        assert!(!fields.contains_key("title"));
        assert!(!fields.contains_key("bio"));
        assert_eq!(
            fields.get_str("updated_at").unwrap(),
            "2024-01-15T10:30:00.000Z"
        );
    }
}
