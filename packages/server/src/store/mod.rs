mod document;
mod error;
mod traits;

pub mod filesystem;
pub mod memory;

pub use document::{Document, Store};
pub use error::StoreError;
pub use traits::DocumentStore;
