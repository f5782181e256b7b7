//! The index engine
//!
//! Owns the canonical row set and the derived lookup structure, and
//! answers `load` and `search` requests from its own tokio task:
//!
//! - **Index construction**: lowercase organisation name → last row seen
//!   with that name, rebuilt wholesale per load ([`DirectoryIndex`]).
//! - **Search execution**: case-insensitive contiguous-substring scan of
//!   every indexed name. Linear per query, which is acceptable off the
//!   interactive thread for datasets of tens of thousands of short names.
//! - **Message protocol**: closed request/response sum types with stable
//!   wire tags and a generation stamp for discarding stale responses
//!   ([`EngineRequest`], [`EngineResponse`]).
//!
//! Load failures (fetch or parse) surface as `error` messages and leave
//! any previously built index serving searches; a row without a usable
//! display name is skipped, never fatal; an unmatched query is an empty
//! result set, never an error.

pub mod error;
pub mod index;
pub mod ingest;
pub mod messages;
pub mod service;

pub use error::{EngineError, EngineResult};
pub use index::DirectoryIndex;
pub use messages::{EngineRequest, EngineResponse};
pub use service::{EngineHandle, EngineState, IndexEngine};
