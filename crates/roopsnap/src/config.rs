use std::{env, path::PathBuf};

/// Default request body cap (10 MiB), large enough for camera JPEGs.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// Which backing stores are active is decided once from this struct when
/// the application state is built.
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string. `None` disables the document store.
    pub mongodb_uri: Option<String>,
    /// MongoDB database name (default: "roopsnap")
    pub mongodb_db_name: String,
    /// Supabase project URL. Needs a key to take effect.
    pub supabase_url: Option<String>,
    /// Supabase anon key, used for reads.
    pub supabase_anon_key: Option<String>,
    /// Supabase service role key, preferred for writes and required for uploads.
    pub supabase_service_role_key: Option<String>,
    /// Storage bucket for uploads (default: "photos")
    pub supabase_bucket: String,
    /// Table holding photo rows (default: "photos")
    pub supabase_photos_table: String,
    /// Directory for the local JSON files (default: "data")
    pub data_dir: PathBuf,
    /// Maximum request body size in bytes (default: 10 MiB)
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MONGODB_URI` - MongoDB connection string (optional)
    /// - `MONGODB_DB_NAME` - MongoDB database name (default: "roopsnap")
    /// - `SUPABASE_URL` - Supabase project URL (optional)
    /// - `SUPABASE_ANON_KEY` - Supabase anon key (optional)
    /// - `SUPABASE_SERVICE_ROLE_KEY` - Supabase service role key (optional)
    /// - `SUPABASE_BUCKET` - Storage bucket name (default: "photos")
    /// - `SUPABASE_PHOTOS_TABLE` - Photo table name (default: "photos")
    /// - `DATA_DIR` - Local JSON store directory (default: "data")
    /// - `MAX_UPLOAD_BYTES` - Request body limit (default: 10485760)
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: non_empty_var("MONGODB_URI"),
            mongodb_db_name: non_empty_var("MONGODB_DB_NAME")
                .unwrap_or_else(|| "roopsnap".to_string()),
            supabase_url: non_empty_var("SUPABASE_URL"),
            supabase_anon_key: non_empty_var("SUPABASE_ANON_KEY"),
            supabase_service_role_key: non_empty_var("SUPABASE_SERVICE_ROLE_KEY"),
            supabase_bucket: non_empty_var("SUPABASE_BUCKET")
                .unwrap_or_else(|| "photos".to_string()),
            supabase_photos_table: non_empty_var("SUPABASE_PHOTOS_TABLE")
                .unwrap_or_else(|| "photos".to_string()),
            data_dir: non_empty_var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }

    /// A configuration with every remote backend disabled.
    pub fn local_only(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            mongodb_uri: None,
            mongodb_db_name: "roopsnap".to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            supabase_service_role_key: None,
            supabase_bucket: "photos".to_string(),
            supabase_photos_table: "photos".to_string(),
            data_dir: data_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Key for Supabase table reads, if the table service is configured.
    pub fn supabase_read_key(&self) -> Option<&str> {
        self.supabase_url.as_ref()?;
        self.supabase_anon_key
            .as_deref()
            .or(self.supabase_service_role_key.as_deref())
    }

    /// Key for Supabase writes and uploads; only the service role key qualifies.
    pub fn supabase_write_key(&self) -> Option<&str> {
        self.supabase_url.as_ref()?;
        self.supabase_service_role_key.as_deref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
