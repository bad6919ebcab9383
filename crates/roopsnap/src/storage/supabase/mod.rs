//! Supabase storage backend.
//!
//! Talks to a Supabase project over plain HTTP: the PostgREST endpoint for
//! the photo table and the Storage API for uploaded files.

mod client;
mod conversions;
mod error;
mod repository;

pub use client::SupabaseClient;
pub use repository::{SupabasePhotoRepository, SupabaseUploadStore};
