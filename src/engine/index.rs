//! The in-memory directory index

use crate::models::{OrgRow, OrgSummary};
use std::collections::HashMap;

/// Mapping from lowercase organisation name to the last row seen with
/// that name.
///
/// Rows sharing a name (case-insensitively) silently overwrite each other
/// in load order; at most one row is retained per distinct lowercase name.
/// Rows without a usable display name are excluded. The index is rebuilt
/// wholesale per load, never merged incrementally, and iteration order is
/// unspecified.
#[derive(Debug, Default)]
pub struct DirectoryIndex {
    entries: HashMap<String, OrgRow>,
}

impl DirectoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a row sequence, in sequence order.
    pub fn build(rows: &[OrgRow]) -> Self {
        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            if let Some(name) = row.display_name() {
                entries.insert(name.to_lowercase(), row.clone());
            }
        }
        tracing::debug!(companies = entries.len(), "search index built");
        Self { entries }
    }

    /// Number of indexed organisations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring search over organisation names.
    ///
    /// The query is lowercased and every key is scanned; a row matches iff
    /// its key contains the query as a contiguous substring. An empty query
    /// matches nothing. Result order follows the map's iteration order and
    /// is unspecified.
    pub fn search(&self, query: &str) -> Vec<OrgSummary> {
        if query.is_empty() {
            return Vec::new();
        }
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|(key, _)| key.contains(&query))
            .filter_map(|(_, row)| OrgSummary::from_row(row))
            .collect()
    }
}
