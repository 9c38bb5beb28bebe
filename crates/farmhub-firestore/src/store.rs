//! Trait abstraction over document-store operations.
//!
//! The provisioning components are generic over [`DocumentStore`] so they run
//! unchanged against the real [`FirestoreClient`](crate::FirestoreClient) and
//! the in-memory [`MemoryStore`](crate::MemoryStore) used in tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::client::FirestoreClient;
use crate::error::FirestoreResult;
use crate::types::{Document, Value};

/// The three operations the provisioning tool needs from a document store.
///
/// `collection` is a slash-separated collection path relative to the database
/// root, e.g. `users` or `users/u1/devices/d1/sensorData`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read. Returns `None` when the document does not exist.
    async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> FirestoreResult<Option<Document>>;

    /// Full-document replace; creates the document when missing.
    async fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
    ) -> FirestoreResult<Document>;

    /// Field-level merge of the masked fields into an existing document.
    /// Fails with a not-found error when the document does not exist; it is
    /// never created by this operation.
    async fn update_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
        update_mask: Vec<String>,
    ) -> FirestoreResult<Document>;
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> FirestoreResult<Option<Document>> {
        // Inherent method; resolution prefers it over the trait method.
        FirestoreClient::get_document(self, collection, doc_id).await
    }

    async fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
    ) -> FirestoreResult<Document> {
        FirestoreClient::set_document(self, collection, doc_id, fields).await
    }

    async fn update_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
        update_mask: Vec<String>,
    ) -> FirestoreResult<Document> {
        FirestoreClient::update_document(self, collection, doc_id, fields, update_mask).await
    }
}
