use std::collections::HashSet;

use base64::Engine as _;
use chrono::{DateTime, Utc};

use super::types::{Record, RecordId, DEFAULT_CATEGORY};

/// Sorts records by `created_at`, newest first.
///
/// The sort is stable, so records sharing a timestamp keep their order.
pub fn sort_newest_first<T: Record>(records: &mut [T]) {
    records.sort_by_key(|record| std::cmp::Reverse(record.created_at()));
}

/// Generates an id for a locally stored record.
///
/// Uses the Unix time in milliseconds, moved forward until it does not clash
/// with any of the `taken` ids.
pub fn next_local_id<'a, I>(taken: I, now: DateTime<Utc>) -> RecordId
where
    I: IntoIterator<Item = &'a RecordId>,
{
    let taken: HashSet<&RecordId> = taken.into_iter().collect();
    let mut candidate = now.timestamp_millis();
    loop {
        let id = RecordId::from(candidate);
        if !taken.contains(&id) {
            return id;
        }
        candidate += 1;
    }
}

/// Returns the category to store, defaulting blank values.
pub fn normalize_category(category: Option<String>) -> String {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Replaces anything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let sanitized: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "upload".to_string()
    } else {
        sanitized
    }
}

/// Object key for an uploaded file: `uploads/<unix-millis>-<file name>`.
pub fn upload_object_key(file_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "uploads/{}-{}",
        now.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// Inlines binary data as a `data:` URI.
pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{content_type};base64,{payload}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::studio::Photo;

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
    }

    fn photo(id: &str, minutes: i64) -> Photo {
        Photo {
            id: RecordId::new(id),
            url: format!("https://cdn/{id}.jpg"),
            category: DEFAULT_CATEGORY.to_string(),
            created_at: base_time() + Duration::minutes(minutes),
        }
    }

    #[test]
    fn test_sort_newest_first() {
        let mut photos = vec![photo("a", 0), photo("c", 20), photo("b", 10)];

        sort_newest_first(&mut photos);

        let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert!(photos
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut photos = vec![photo("first", 5), photo("second", 5), photo("old", 0)];

        sort_newest_first(&mut photos);

        let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "old"]);
    }

    #[test]
    fn test_next_local_id_uses_millis() {
        let taken: Vec<RecordId> = Vec::new();
        let id = next_local_id(&taken, base_time());
        assert_eq!(id.as_str(), base_time().timestamp_millis().to_string());
    }

    #[test]
    fn test_next_local_id_skips_taken_ids() {
        let millis = base_time().timestamp_millis();
        let existing = vec![
            RecordId::from(millis),
            RecordId::new("legacy"),
            RecordId::from(millis + 1),
        ];

        let id = next_local_id(&existing, base_time());

        assert_eq!(id.as_str(), (millis + 2).to_string());
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category(None), "Portrait");
        assert_eq!(normalize_category(Some("  ".to_string())), "Portrait");
        assert_eq!(normalize_category(Some(" Wedding ".to_string())), "Wedding");
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("my photo (1).JPG"), "my_photo__1_.JPG");
        assert_eq!(sanitize_file_name("ok-name_2.png"), "ok-name_2.png");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn test_upload_object_key() {
        let key = upload_object_key("beach day.jpg", base_time());
        assert_eq!(
            key,
            format!("uploads/{}-beach_day.jpg", base_time().timestamp_millis())
        );
    }

    #[test]
    fn test_data_uri() {
        assert_eq!(
            data_uri("image/png", b"hello"),
            "data:image/png;base64,aGVsbG8="
        );
    }
}
