//! Row conversion functions for the photo table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use roopsnap_core::studio::{normalize_category, NewPhoto, Photo, RecordId};

/// A photo row as PostgREST returns it.
///
/// `id` may be a bigint or a uuid depending on how the table was created;
/// `category` may be null.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoRow {
    pub id: RecordId,
    pub url: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "roopsnap_core::serde::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// A photo row to insert. The table assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoInsert<'a> {
    pub url: &'a str,
    pub category: &'a str,
    #[serde(with = "roopsnap_core::serde::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Convert a table row to a photo.
pub fn row_to_photo(row: PhotoRow) -> Photo {
    Photo {
        id: row.id,
        url: row.url,
        category: normalize_category(row.category),
        created_at: row.created_at,
    }
}

/// Convert raw rows to photos. Rows that do not decode are skipped with a
/// warning.
pub fn rows_to_photos(rows: Vec<Value>) -> Vec<Photo> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<PhotoRow>(row) {
            Ok(row) => Some(row_to_photo(row)),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed photo row");
                None
            }
        })
        .collect()
}

/// Convert a new photo to the row to insert.
pub fn photo_to_insert(photo: &NewPhoto) -> PhotoInsert<'_> {
    PhotoInsert {
        url: &photo.url,
        category: &photo.category,
        created_at: photo.created_at,
    }
}
