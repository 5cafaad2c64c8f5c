use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::document::Document;
use super::error::StoreError;
use super::traits::DocumentStore;

/// Document store that keeps the last saved document in memory.
///
/// Useful for tests and for running the service without a disk.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Document>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            saved: Mutex::new(document),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every following `save` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Copy of the last saved document.
    pub fn snapshot(&self) -> Document {
        self.saved
            .lock()
            .map(|doc| doc.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document, StoreError> {
        Ok(self.snapshot())
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        let mut saved = self
            .saved
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        *saved = document.clone();
        Ok(())
    }
}
