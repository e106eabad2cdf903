//! Database context for managing connections and store access.
//!
//! Provides a unified entry point for database operations. Create one
//! context at process start, then use it to obtain the individual stores.

use diesel_async::SimpleAsyncConnection;

use super::pool::{AsyncSqlitePool, DieselError};
use super::repositories::RepositoryStore;
use super::search_history::SearchHistoryStore;

/// Database context owning the connection factory.
///
/// # Example
/// ```ignore
/// let ctx = DbContext::from_url("gitscope.db");
/// ctx.init_schema().await?;
/// let repos = ctx.repositories();
/// ```
#[derive(Clone)]
pub struct DbContext {
    pool: AsyncSqlitePool,
}

impl DbContext {
    /// Create a context from a database URL or file path.
    ///
    /// Accepts `sqlite:path/to/db.sqlite` URLs or plain file paths.
    pub fn from_url(database_url: &str) -> Self {
        Self {
            pool: AsyncSqlitePool::new(database_url),
        }
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &AsyncSqlitePool {
        &self.pool
    }

    /// Get a repository store.
    pub fn repositories(&self) -> RepositoryStore {
        RepositoryStore::new(self.pool.clone())
    }

    /// Get a search history store.
    pub fn search_history(&self) -> SearchHistoryStore {
        SearchHistoryStore::new(self.pool.clone())
    }

    /// Initialize the database schema.
    ///
    /// Creates the necessary tables if they don't exist.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        conn.batch_execute(
            r#"
            -- Repositories table, keyed by the id GitHub assigns
            CREATE TABLE IF NOT EXISTS repositories (
                github_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                full_name TEXT NOT NULL,
                description TEXT,
                html_url TEXT NOT NULL,
                clone_url TEXT NOT NULL,
                ssh_url TEXT NOT NULL,
                language TEXT,
                stars_count INTEGER NOT NULL DEFAULT 0,
                forks_count INTEGER NOT NULL DEFAULT 0,
                watchers_count INTEGER NOT NULL DEFAULT 0,
                open_issues_count INTEGER NOT NULL DEFAULT 0,
                default_branch TEXT NOT NULL DEFAULT 'main',
                topics TEXT NOT NULL DEFAULT '[]',
                owner_login TEXT NOT NULL,
                owner_avatar_url TEXT NOT NULL DEFAULT '',
                created_at TEXT,
                updated_at TEXT,
                pushed_at TEXT,
                is_private INTEGER NOT NULL DEFAULT 0,
                is_fork INTEGER NOT NULL DEFAULT 0,
                archived INTEGER NOT NULL DEFAULT 0,
                disabled INTEGER NOT NULL DEFAULT 0,
                size INTEGER NOT NULL DEFAULT 0,
                license_name TEXT,
                license_spdx_id TEXT
            );

            -- Search history table, append-only
            CREATE TABLE IF NOT EXISTS search_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query TEXT NOT NULL,
                results_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            -- Indexes
            CREATE INDEX IF NOT EXISTS idx_repositories_full_name ON repositories(full_name);
            CREATE INDEX IF NOT EXISTS idx_repositories_stars ON repositories(stars_count);
            CREATE INDEX IF NOT EXISTS idx_search_history_created ON search_history(created_at);
            "#,
        )
        .await
    }

    /// Get list of all tables in the database.
    pub async fn list_tables(&self) -> Result<Vec<String>, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<TableName> = diesel_async::RunQueryDsl::load(
            diesel::sql_query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            ),
            &mut conn,
        )
        .await?;

        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}

#[derive(diesel::QueryableByName)]
struct TableName {
    #[diesel(sql_type = diesel::sql_types::Text)]
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_schema_creates_tables() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = DbContext::from_url(&db_path.display().to_string());
        ctx.init_schema().await.unwrap();

        let tables = ctx.list_tables().await.unwrap();
        assert!(tables.contains(&"repositories".to_string()));
        assert!(tables.contains(&"search_history".to_string()));

        // Idempotent: running again must not fail.
        ctx.init_schema().await.unwrap();

        let repos = ctx.repositories();
        assert_eq!(repos.count().await.unwrap(), 0);
    }
}
