//! Message protocol between host and engine
//!
//! A closed pair of tagged unions with exhaustive handling; the wire tags
//! are stable (`load_csv`, `load_data`, `search` inbound; `data_loaded`,
//! `search_results`, `error` outbound). Messages are fire-and-forget in
//! both directions with no correlation IDs; responses instead carry the
//! load generation so the host can discard results computed against a
//! superseded index.

use crate::models::{OrgRow, OrgSummary};
use serde::{Deserialize, Serialize};

/// Requests accepted by the index engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineRequest {
    /// Fetch CSV text from a URL or local path, parse it, build the index.
    LoadCsv { source: String },

    /// Build the index directly from already-parsed rows.
    LoadData { rows: Vec<OrgRow> },

    /// Run a substring search over organisation names.
    Search { query: String },
}

/// Responses emitted by the index engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineResponse {
    /// Index build complete and queryable.
    ///
    /// `rows` echoes the accepted row set when the engine parsed it itself
    /// (the `load_csv` path); for `load_data` the host already holds the
    /// rows and the acknowledgement carries none.
    DataLoaded {
        generation: u64,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        rows: Option<Vec<OrgRow>>,
    },

    /// Query echo plus the match list.
    SearchResults {
        generation: u64,
        query: String,
        results: Vec<OrgSummary>,
    },

    /// Load or parse failure; index state unchanged.
    Error { message: String },
}

impl EngineResponse {
    /// Get the message type as a string (the wire tag).
    pub fn message_type(&self) -> &'static str {
        match self {
            EngineResponse::DataLoaded { .. } => "data_loaded",
            EngineResponse::SearchResults { .. } => "search_results",
            EngineResponse::Error { .. } => "error",
        }
    }
}
