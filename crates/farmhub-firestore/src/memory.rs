//! In-memory document store for testing.
//!
//! Implements [`DocumentStore`] over a hash map so provisioning flows can be
//! exercised without a Firestore project or emulator. Supports failure
//! injection: a write budget can be set so the Nth write and everything after
//! it fails, for testing abort behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{FirestoreError, FirestoreResult};
use crate::store::DocumentStore;
use crate::types::{Document, Value};

struct Inner {
    docs: RwLock<HashMap<(String, String), Document>>,
    /// Remaining writes before injected failure; negative means unlimited.
    write_budget: AtomicI64,
    write_count: AtomicU64,
}

/// An in-memory [`DocumentStore`].
///
/// Cheap to clone; clones share the same underlying map, so a provisioner and
/// a verifier built from clones observe each other's writes.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                docs: RwLock::new(HashMap::new()),
                write_budget: AtomicI64::new(-1),
                write_count: AtomicU64::new(0),
            }),
        }
    }

    /// Allow `n` more writes, then fail every write with a server error.
    /// Reads are unaffected.
    pub fn fail_after_writes(&self, n: u64) {
        self.inner.write_budget.store(n as i64, Ordering::SeqCst);
    }

    /// Total writes (sets and updates) accepted so far.
    pub fn write_count(&self) -> u64 {
        self.inner.write_count.load(Ordering::SeqCst)
    }

    /// Number of documents currently stored.
    pub async fn document_count(&self) -> usize {
        self.inner.docs.read().await.len()
    }

    fn consume_write_budget(&self) -> FirestoreResult<()> {
        let budget = self.inner.write_budget.load(Ordering::SeqCst);
        if budget < 0 {
            return Ok(());
        }
        if budget == 0 {
            return Err(FirestoreError::ServerError(
                503,
                "injected write failure".to_string(),
            ));
        }
        self.inner.write_budget.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }

    fn document_name(collection: &str, doc_id: &str) -> String {
        format!(
            "projects/test/databases/(default)/documents/{}/{}",
            collection, doc_id
        )
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(
        &self,
        collection: &str,
        doc_id: &str,
    ) -> FirestoreResult<Option<Document>> {
        let docs = self.inner.docs.read().await;
        Ok(docs
            .get(&(collection.to_string(), doc_id.to_string()))
            .cloned())
    }

    async fn set_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
    ) -> FirestoreResult<Document> {
        self.consume_write_budget()?;

        let now = Utc::now().to_rfc3339();
        let key = (collection.to_string(), doc_id.to_string());
        let mut docs = self.inner.docs.write().await;

        let create_time = docs
            .get(&key)
            .and_then(|d| d.create_time.clone())
            .unwrap_or_else(|| now.clone());

        let doc = Document {
            name: Some(Self::document_name(collection, doc_id)),
            fields: Some(fields),
            create_time: Some(create_time),
            update_time: Some(now),
        };
        docs.insert(key, doc.clone());
        self.inner.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(doc)
    }

    async fn update_document(
        &self,
        collection: &str,
        doc_id: &str,
        fields: HashMap<String, Value>,
        update_mask: Vec<String>,
    ) -> FirestoreResult<Document> {
        self.consume_write_budget()?;

        let key = (collection.to_string(), doc_id.to_string());
        let mut docs = self.inner.docs.write().await;

        let doc = docs
            .get_mut(&key)
            .ok_or_else(|| FirestoreError::not_found(format!("{}/{}", collection, doc_id)))?;

        let existing = doc.fields.get_or_insert_with(HashMap::new);
        for field in &update_mask {
            match fields.get(field) {
                Some(value) => {
                    existing.insert(field.clone(), value.clone());
                }
                None => {
                    existing.remove(field);
                }
            }
        }
        doc.update_time = Some(Utc::now().to_rfc3339());

        self.inner.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(doc.clone())
    }
}
