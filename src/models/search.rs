//! Search history model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// One recorded search query. Append-only: entries are written once per
/// successful search and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Database row id.
    pub id: i64,
    /// The query string as the client sent it.
    pub query: String,
    /// Total result count reported by the upstream search.
    pub results_count: i64,
    /// Server-assigned time the search was recorded.
    pub created_at: DateTime<Utc>,
}

impl SearchRecord {
    /// Client-facing JSON shape.
    pub fn to_payload(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "query": self.query,
            "results_count": self.results_count,
            "created_at": self.created_at.to_rfc3339(),
        })
    }
}
