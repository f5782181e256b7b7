//! Remote document collection client
//!
//! The directory's row set lives in a remote document collection between
//! sessions. [`DocumentStore`] is the seam: the search path reads every
//! document at startup, the upload path clears the collection and
//! re-inserts parsed rows in batches. [`HttpDocumentStore`] talks to a
//! JSON REST endpoint; tests substitute in-memory implementations.

mod error;
mod http;

pub use error::{StoreError, StoreResult};
pub use http::HttpDocumentStore;

use crate::models::OrgRow;
use async_trait::async_trait;

/// Access to the remote document collection.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in the collection.
    async fn fetch_all(&self) -> StoreResult<Vec<OrgRow>>;

    /// Delete every document in the collection, returning how many were
    /// removed.
    async fn delete_all(&self) -> StoreResult<usize>;

    /// Insert a batch of documents. Callers are responsible for keeping
    /// batches within the store's write cap.
    async fn insert_batch(&self, documents: &[OrgRow]) -> StoreResult<()>;
}
