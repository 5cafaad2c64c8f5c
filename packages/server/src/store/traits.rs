use async_trait::async_trait;

use super::document::Document;
use super::error::StoreError;

/// Durable home of the whole document.
///
/// Implementations read and write the document wholesale; there is no
/// partial update.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the document, creating and persisting an empty one if none exists.
    async fn load(&self) -> Result<Document, StoreError>;

    /// Replace the stored document with `document`.
    async fn save(&self, document: &Document) -> Result<(), StoreError>;
}
