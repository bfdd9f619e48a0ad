use serde::{Deserialize, Serialize};

use crate::{book::Book, listing::Statistics, member::Member};

/// Serializable copy of a catalog's current state
///
/// Snapshots are for display and export only; a catalog is never rebuilt
/// from one.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSnapshot {
    /// Books in insertion order
    pub books: Vec<Book>,
    /// Members in registration order
    pub members: Vec<Member>,
    /// Counts at the time of the snapshot
    pub statistics: Statistics,
}

impl CatalogSnapshot {
    /// Render the snapshot as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
