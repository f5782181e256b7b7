//! HTTP JSON implementation of [`DocumentStore`]
//!
//! Collection contract:
//! - `GET    {base_url}/{collection}`        → JSON array of documents
//! - `DELETE {base_url}/{collection}`        → `{"deleted": <count>}`
//! - `POST   {base_url}/{collection}/batch`  → accepts `{"documents": [...]}`

use crate::models::OrgRow;
use crate::store::error::{StoreError, StoreResult};
use crate::store::DocumentStore;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Document store backed by a JSON REST collection endpoint.
#[derive(Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    collection: String,
}

#[derive(Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    deleted: usize,
}

impl HttpDocumentStore {
    /// Create a store client for one collection.
    pub fn new(base_url: &str, collection: &str, timeout_secs: u64) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Request(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    async fn check_status(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn fetch_all(&self) -> StoreResult<Vec<OrgRow>> {
        let response = self.client.get(self.collection_url()).send().await?;
        let response = Self::check_status(response).await?;
        let documents: Vec<OrgRow> = response.json().await?;
        debug!(
            collection = %self.collection,
            count = documents.len(),
            "fetched documents"
        );
        Ok(documents)
    }

    async fn delete_all(&self) -> StoreResult<usize> {
        let response = self.client.delete(self.collection_url()).send().await?;
        let response = Self::check_status(response).await?;
        let body: DeleteResponse = response.json().await.unwrap_or(DeleteResponse { deleted: 0 });
        debug!(
            collection = %self.collection,
            deleted = body.deleted,
            "cleared collection"
        );
        Ok(body.deleted)
    }

    async fn insert_batch(&self, documents: &[OrgRow]) -> StoreResult<()> {
        let response = self
            .client
            .post(format!("{}/batch", self.collection_url()))
            .json(&json!({ "documents": documents }))
            .send()
            .await?;
        Self::check_status(response).await?;
        debug!(
            collection = %self.collection,
            count = documents.len(),
            "inserted batch"
        );
        Ok(())
    }
}
