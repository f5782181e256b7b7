//! The host controller
//!
//! The interactive-thread side of the system: it owns query dispatch and
//! rendering, never the index. Guards run here, before any message is
//! sent — queries under the minimum length are never dispatched, and
//! input changes are debounced. Responses arriving for a superseded query
//! or a superseded index generation are discarded.

mod debounce;
mod render;

pub use debounce::debounce;
pub use render::{highlight, render_no_data, render_results, result_line};

use crate::config::SearchOptions;
use crate::engine::{EngineHandle, EngineRequest, EngineResponse};
use crate::error::{AppError, Result};
use crate::models::{OrgRow, OrgSummary};
use tracing::{debug, warn};

/// Outcome of one host-side query attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Below the minimum query length; nothing was dispatched.
    TooShort,
    /// No dataset is loaded (or the last load held zero usable rows).
    NoData,
    /// The engine answered for this query.
    Results {
        query: String,
        results: Vec<OrgSummary>,
    },
}

/// Host-side controller over a spawned engine.
pub struct HostController {
    engine: EngineHandle,
    min_query_len: usize,
    /// Latest load generation acknowledged by the engine.
    generation: u64,
    /// Usable rows accepted by the latest load, once one completed.
    loaded_rows: Option<usize>,
}

impl HostController {
    pub fn new(engine: EngineHandle, options: &SearchOptions) -> Self {
        Self {
            engine,
            min_query_len: options.min_query_len,
            generation: 0,
            loaded_rows: None,
        }
    }

    /// Whether a load completed and produced at least one row.
    pub fn has_data(&self) -> bool {
        matches!(self.loaded_rows, Some(n) if n > 0)
    }

    /// Generation of the most recently acknowledged load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Send already-parsed rows to the engine and wait for the build
    /// acknowledgement. Returns the number of rows handed over.
    pub async fn load_rows(&mut self, rows: Vec<OrgRow>) -> Result<usize> {
        let count = rows.len();
        self.engine.send(EngineRequest::LoadData { rows }).await;
        self.await_loaded().await?;
        self.loaded_rows = Some(count);
        Ok(count)
    }

    /// Ask the engine to fetch and parse a CSV source, and wait for the
    /// build acknowledgement. Returns the number of accepted rows.
    pub async fn load_csv(&mut self, source: &str) -> Result<usize> {
        self.engine
            .send(EngineRequest::LoadCsv {
                source: source.to_string(),
            })
            .await;
        let rows = self.await_loaded().await?;
        let count = rows.map(|r| r.len()).unwrap_or(0);
        self.loaded_rows = Some(count);
        Ok(count)
    }

    /// Run one query through the host guards and the engine.
    ///
    /// Search responses whose echoed query differs from this one, or whose
    /// generation predates the latest acknowledged load, are stale and
    /// silently discarded.
    pub async fn query(&mut self, raw: &str) -> Result<QueryOutcome> {
        let query = raw.trim();
        if query.chars().count() < self.min_query_len {
            return Ok(QueryOutcome::TooShort);
        }
        if self.loaded_rows == Some(0) {
            return Ok(QueryOutcome::NoData);
        }

        self.engine
            .send(EngineRequest::Search {
                query: query.to_string(),
            })
            .await;

        loop {
            match self.engine.recv().await {
                Some(EngineResponse::SearchResults {
                    generation,
                    query: echoed,
                    results,
                }) => {
                    if echoed != query || generation < self.generation {
                        debug!(query = %echoed, generation, "discarding stale search results");
                        continue;
                    }
                    return Ok(QueryOutcome::Results {
                        query: echoed,
                        results,
                    });
                }
                Some(EngineResponse::DataLoaded { generation, rows }) => {
                    // A load ack raced ahead of this query's results.
                    self.generation = generation;
                    if let Some(rows) = rows {
                        self.loaded_rows = Some(rows.len());
                    }
                }
                Some(EngineResponse::Error { message }) => {
                    warn!(error = %message, "engine reported a load error");
                    return Err(AppError::Load(message));
                }
                None => return Err(AppError::Internal("engine task exited".to_string())),
            }
        }
    }

    /// Wait for the acknowledgement of an in-flight load, discarding any
    /// search results that were still in the pipe.
    async fn await_loaded(&mut self) -> Result<Option<Vec<OrgRow>>> {
        loop {
            match self.engine.recv().await {
                Some(EngineResponse::DataLoaded { generation, rows }) => {
                    self.generation = generation;
                    return Ok(rows);
                }
                Some(EngineResponse::SearchResults { query, .. }) => {
                    debug!(query = %query, "discarding search results superseded by a load");
                }
                Some(EngineResponse::Error { message }) => {
                    return Err(AppError::Load(message));
                }
                None => return Err(AppError::Internal("engine task exited".to_string())),
            }
        }
    }
}
