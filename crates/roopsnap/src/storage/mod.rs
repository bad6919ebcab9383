//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `roopsnap_core::storage`, plus the fallback chains that tie
//! them together. Remote backends are compiled in via feature flags and
//! only used when their configuration is present at start-up.
//!
//! # Feature Flags
//!
//! - `mongodb` (default): contact messages, photos and the profile in MongoDB
//! - `supabase` (default): the photo table and object storage for uploads
//!
//! The local JSON store and inline uploads are always available.
//!
//! # Examples
//!
//! Build without any remote backend:
//! ```bash
//! cargo build -p roopsnap --no-default-features
//! ```

pub mod fallback;
pub mod inline;
pub mod local;

#[cfg(feature = "mongodb")]
pub mod mongodb;

#[cfg(feature = "supabase")]
pub mod supabase;

pub use fallback::{FallbackMessageRepository, FallbackPhotoRepository, FallbackUploadStore};
pub use inline::InlineUploadStore;
pub use local::LocalRepository;

#[cfg(feature = "mongodb")]
pub use self::mongodb::MongoRepository;

#[cfg(feature = "supabase")]
pub use supabase::{SupabaseClient, SupabasePhotoRepository, SupabaseUploadStore};
