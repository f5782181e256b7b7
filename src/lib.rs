//! Company directory search
//!
//! A small client-side search tool for a directory of organisations. Rows
//! are loaded from a CSV source or a remote document collection, indexed
//! in memory by lowercase organisation name, and queried by substring
//! match while the interactive side stays responsive.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │           Host Controller                        │
//! ├─────────────────────────────────────────────────┤
//! │  - min-length guard     - debounce               │
//! │  - stale-result discard - highlight rendering    │
//! └─────────────────────────────────────────────────┘
//!          │ EngineRequest          ▲ EngineResponse
//!          ▼                        │
//! ┌─────────────────────────────────────────────────┐
//! │           Index Engine (tokio task)              │
//! ├─────────────────────────────────────────────────┤
//! │  - load_csv / load_data / search                 │
//! │  - generation counter                            │
//! └─────────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────────┐
//! │           DirectoryIndex                         │
//! │  lowercase name → last row seen with that name   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! The engine owns the index exclusively and processes requests strictly
//! in arrival order; the host and engine exchange fire-and-forget tagged
//! messages over bounded channels. A companion [`upload`] path clears a
//! remote collection and re-uploads parsed CSV rows in capped batches.

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod models;
pub mod store;
pub mod upload;

pub use crate::config::Config;
pub use engine::{
    DirectoryIndex, EngineHandle, EngineRequest, EngineResponse, EngineState, IndexEngine,
};
pub use error::{AppError, Result};
pub use models::{OrgRow, OrgSummary};
