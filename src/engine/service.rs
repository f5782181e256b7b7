//! Engine instance and worker task
//!
//! [`IndexEngine`] owns the index and exposes `load_rows`, `load_csv` and
//! `search` as plain methods, so a fresh engine can be constructed per
//! test with no shared state. [`IndexEngine::spawn`] wraps an engine in a
//! dedicated tokio task that drains requests strictly in arrival order
//! and emits responses fire-and-forget; the index never leaves the task.

use crate::engine::error::EngineResult;
use crate::engine::index::DirectoryIndex;
use crate::engine::ingest;
use crate::engine::messages::{EngineRequest, EngineResponse};
use crate::models::{OrgRow, OrgSummary};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Request/response channel capacity between host and engine. The
/// protocol carries at most one outstanding load and one search narrative
/// at a time, so a small buffer is plenty.
const CHANNEL_CAPACITY: usize = 32;

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No index built yet; searches return an empty result set.
    Empty,
    /// Index built (possibly with zero entries) and queryable.
    Ready,
}

/// The index engine: canonical row set, derived index, and the load
/// generation counter.
pub struct IndexEngine {
    index: DirectoryIndex,
    state: EngineState,
    generation: u64,
    client: reqwest::Client,
}

impl Default for IndexEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexEngine {
    pub fn new() -> Self {
        Self {
            index: DirectoryIndex::new(),
            state: EngineState::Empty,
            generation: 0,
            client: reqwest::Client::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Generation of the current index; incremented on every successful
    /// load, zero before the first.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Discard any previous index and rebuild from the given rows.
    ///
    /// Returns the new generation. The index is fully built before this
    /// returns; there is no partial-index visibility.
    pub fn load_rows(&mut self, rows: &[OrgRow]) -> u64 {
        self.index = DirectoryIndex::build(rows);
        self.state = EngineState::Ready;
        self.generation += 1;
        info!(
            companies = self.index.len(),
            generation = self.generation,
            "search index built"
        );
        self.generation
    }

    /// Fetch CSV text from a URL or local path, parse it, and rebuild the
    /// index from the parsed rows.
    ///
    /// On fetch or parse failure the previous index is left untouched and
    /// keeps serving searches.
    pub async fn load_csv(&mut self, source: &str) -> EngineResult<(u64, Vec<OrgRow>)> {
        let text = ingest::fetch_text(&self.client, source).await?;
        let rows = ingest::parse_rows(&text)?;
        let generation = self.load_rows(&rows);
        Ok((generation, rows))
    }

    /// Substring search over the current index. Valid in every state; an
    /// empty or unbuilt index yields an empty result set.
    pub fn search(&self, query: &str) -> Vec<OrgSummary> {
        self.index.search(query)
    }

    /// Handle one request, producing exactly one response.
    async fn dispatch(&mut self, request: EngineRequest) -> EngineResponse {
        match request {
            EngineRequest::LoadCsv { source } => match self.load_csv(&source).await {
                Ok((generation, rows)) => EngineResponse::DataLoaded {
                    generation,
                    rows: Some(rows),
                },
                Err(err) => {
                    warn!(source = %source, error = %err, "CSV load failed");
                    EngineResponse::Error {
                        message: err.to_string(),
                    }
                }
            },
            EngineRequest::LoadData { rows } => {
                let generation = self.load_rows(&rows);
                EngineResponse::DataLoaded {
                    generation,
                    rows: None,
                }
            }
            EngineRequest::Search { query } => {
                let results = self.search(&query);
                EngineResponse::SearchResults {
                    generation: self.generation,
                    query,
                    results,
                }
            }
        }
    }

    /// Spawn the engine on its own task and return the host-side handle.
    ///
    /// The task runs until the request channel closes (handle dropped) or
    /// the host stops receiving responses.
    pub fn spawn(mut self) -> EngineHandle {
        let (request_tx, mut request_rx) = mpsc::channel::<EngineRequest>(CHANNEL_CAPACITY);
        let (response_tx, response_rx) = mpsc::channel::<EngineResponse>(CHANNEL_CAPACITY);

        tokio::spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let response = self.dispatch(request).await;
                if response_tx.send(response).await.is_err() {
                    break;
                }
            }
        });

        EngineHandle {
            requests: request_tx,
            responses: response_rx,
        }
    }
}

/// Host-side handle to a spawned engine.
///
/// Sending and receiving are independent one-way streams; there is no
/// request/response correlation beyond the generation stamp.
pub struct EngineHandle {
    requests: mpsc::Sender<EngineRequest>,
    responses: mpsc::Receiver<EngineResponse>,
}

impl EngineHandle {
    /// Assemble a handle from raw channel ends, for tests that script the
    /// engine side of the protocol by hand.
    #[cfg(test)]
    pub(crate) fn from_parts(
        requests: mpsc::Sender<EngineRequest>,
        responses: mpsc::Receiver<EngineResponse>,
    ) -> Self {
        Self {
            requests,
            responses,
        }
    }

    /// Send a request, fire-and-forget.
    pub async fn send(&self, request: EngineRequest) {
        if self.requests.send(request).await.is_err() {
            warn!("engine task is gone; request dropped");
        }
    }

    /// Receive the next response; `None` when the engine task has exited.
    pub async fn recv(&mut self) -> Option<EngineResponse> {
        self.responses.recv().await
    }
}
