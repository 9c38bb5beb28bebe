//! Firestore REST API client for the FarmHub provisioning tool.
//!
//! This crate provides:
//! - A thin REST client with service-account authentication via gcp_auth
//! - Emulator support (`FIRESTORE_EMULATOR_HOST`)
//! - A [`DocumentStore`] trait seam with an in-memory implementation for tests
//! - Typed errors and wire-value conversions

pub mod client;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod store;
pub mod token_cache;
pub mod types;

#[cfg(test)]
mod client_tests;

pub use client::{FirestoreClient, FirestoreConfig};
pub use error::{FirestoreError, FirestoreResult};
pub use memory::MemoryStore;
pub use store::DocumentStore;
pub use types::{Document, FromFirestoreValue, ToFirestoreValue, Value};
