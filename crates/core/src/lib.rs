//! Core domain types and storage contracts for the RoopSnap studio site.
//!
//! Everything in this crate is pure: no network, no file system. Backends
//! live in the server crate and implement the traits from [`storage`].

pub mod serde;
pub mod storage;
pub mod studio;
