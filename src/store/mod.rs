//! Persistence layer for cached repositories and search history.
//!
//! All database access uses Diesel ORM with compile-time query checking,
//! running SQLite through diesel-async's SyncConnectionWrapper.

pub mod context;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod search_history;
mod util;

pub use context::DbContext;
pub use pool::{AsyncSqliteConnection, AsyncSqlitePool, DieselError};
pub use repositories::{RepositoryStore, SavedPage};
pub use search_history::SearchHistoryStore;

use chrono::{DateTime, Utc};

/// Parse a datetime string from the database, defaulting to Unix epoch on error.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// Parse an optional datetime string from the database.
pub fn parse_datetime_opt(s: Option<String>) -> Option<DateTime<Utc>> {
    s.and_then(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}
