use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::error::StoreError;
use super::traits::DocumentStore;
use crate::models::evaluation::Submission;
use crate::models::session::Session;

/// Everything the service persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

/// In-memory snapshot of the document with write-through persistence.
///
/// A single lock guards the snapshot. `mutate` holds it across the change
/// and the save, so mutations never interleave.
pub struct Store {
    backend: Arc<dyn DocumentStore>,
    document: Mutex<Document>,
}

impl Store {
    /// Load the snapshot from `backend`.
    pub async fn open(backend: Arc<dyn DocumentStore>) -> Result<Self, StoreError> {
        let document = backend.load().await?;
        tracing::debug!(
            sessions = document.sessions.len(),
            submissions = document.submissions.len(),
            "Document loaded"
        );
        Ok(Self {
            backend,
            document: Mutex::new(document),
        })
    }

    /// Run `f` against the current snapshot.
    pub async fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        let guard = self.document.lock().await;
        f(&guard)
    }

    /// Apply `f` to a copy of the snapshot, persist the copy, then publish it.
    ///
    /// If `f` fails or the save fails, the snapshot is left exactly as it was.
    pub async fn mutate<R, E>(&self, f: impl FnOnce(&mut Document) -> Result<R, E>) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.document.lock().await;
        let mut next = guard.clone();
        let result = f(&mut next)?;
        self.backend.save(&next).await?;
        *guard = next;
        Ok(result)
    }
}
