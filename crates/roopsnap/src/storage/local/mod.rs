//! Local JSON file backend.
//!
//! The last resort of every fallback chain. Each resource is one JSON array
//! on disk, rewritten in full on every change. Writers are not serialized:
//! two concurrent writes race and the later one wins.

mod file;
mod repository;

pub use file::JsonFile;
pub use repository::LocalRepository;
