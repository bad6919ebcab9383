//! MongoDB storage backend.
//!
//! Holds contact messages, gallery photos and the singleton profile in the
//! `contact_messages`, `photos` and `profile` collections.

mod conversions;
mod error;
mod repository;

pub use repository::MongoRepository;
