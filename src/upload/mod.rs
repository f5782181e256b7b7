//! Clear-then-batch upload of parsed rows to the remote collection
//!
//! The companion maintenance path: every existing document is deleted,
//! then the new row set is written in batches capped at the store's write
//! limit, with cumulative progress reported as a fraction in [0, 1] after
//! each committed batch. Null field values are stripped before write and
//! rows with no remaining fields are skipped.

use crate::models::OrgRow;
use crate::store::{DocumentStore, StoreResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Maximum writes per batch, matching the remote store's per-batch cap.
pub const MAX_BATCH_SIZE: usize = 500;

/// Outcome of one replace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadReport {
    /// Documents removed from the collection before the upload
    pub cleared: usize,
    /// Documents written
    pub uploaded: usize,
    /// Rows skipped because no defined fields remained after sanitizing
    pub skipped: usize,
}

/// Uploads a row set into a document collection, replacing its contents.
pub struct UploadService {
    store: Arc<dyn DocumentStore>,
    batch_size: usize,
}

impl UploadService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Override the batch size; clamped to the store's per-batch cap.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);
        self
    }

    /// Clear the collection, then insert the given rows in batches.
    ///
    /// `on_progress` receives the fraction of sanitized rows committed so
    /// far, in [0, 1], once per batch. Nothing is retried on failure.
    pub async fn replace_collection(
        &self,
        rows: &[OrgRow],
        mut on_progress: impl FnMut(f64),
    ) -> StoreResult<UploadReport> {
        let mut documents = Vec::with_capacity(rows.len());
        let mut skipped = 0usize;
        for row in rows {
            match sanitize_row(row) {
                Some(document) => documents.push(document),
                None => skipped += 1,
            }
        }

        let cleared = self.store.delete_all().await?;
        info!(cleared, "cleared old documents");

        let total = documents.len();
        let mut uploaded = 0usize;
        for chunk in documents.chunks(self.batch_size) {
            self.store.insert_batch(chunk).await?;
            uploaded += chunk.len();
            on_progress(uploaded as f64 / total as f64);
            info!(uploaded, total, "uploaded batch");
        }

        Ok(UploadReport {
            cleared,
            uploaded,
            skipped,
        })
    }
}

/// Drop null values from a row; `None` when no defined fields remain.
fn sanitize_row(row: &OrgRow) -> Option<OrgRow> {
    let fields: serde_json::Map<String, Value> = row
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(OrgRow(fields))
    }
}
