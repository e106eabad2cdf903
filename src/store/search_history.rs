//! Append-only search history store.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{NewSearchRecord, SearchHistoryRow};
use super::pool::{AsyncSqlitePool, DieselError};
use crate::models::SearchRecord;
use crate::schema::search_history;

/// Diesel-based search history store.
#[derive(Clone)]
pub struct SearchHistoryStore {
    pool: AsyncSqlitePool,
}

impl SearchHistoryStore {
    /// Create a new search history store.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Record one search. Entries are never updated or deleted.
    pub async fn record(&self, query: &str, results_count: i64) -> Result<SearchRecord, DieselError> {
        let mut conn = self.pool.get().await?;

        let created_at = Utc::now();
        let created_at_str = created_at.to_rfc3339();

        diesel::insert_into(search_history::table)
            .values(NewSearchRecord {
                query,
                results_count,
                created_at: &created_at_str,
            })
            .execute(&mut conn)
            .await?;

        let id = diesel::sql_query("SELECT last_insert_rowid()")
            .get_result::<LastInsertRowId>(&mut conn)
            .await?
            .id;

        Ok(SearchRecord {
            id,
            query: query.to_string(),
            results_count,
            created_at,
        })
    }

    /// The most recent entries, newest first.
    pub async fn recent(&self, limit: u32) -> Result<Vec<SearchRecord>, DieselError> {
        let mut conn = self.pool.get().await?;

        let rows: Vec<SearchHistoryRow> = search_history::table
            .order((
                search_history::created_at.desc(),
                search_history::id.desc(),
            ))
            .limit(limit as i64)
            .load(&mut conn)
            .await?;

        Ok(rows.into_iter().map(SearchHistoryRow::into_model).collect())
    }
}

#[derive(diesel::QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt, column_name = "last_insert_rowid()")]
    id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DbContext;
    use tempfile::tempdir;

    async fn setup_store() -> (SearchHistoryStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let ctx = DbContext::from_url(&db_path.display().to_string());
        ctx.init_schema().await.unwrap();

        (ctx.search_history(), dir)
    }

    #[tokio::test]
    async fn test_record_and_recent() {
        let (store, _dir) = setup_store().await;

        store.record("rust web", 120).await.unwrap();
        store.record("flask", 7).await.unwrap();
        let last = store.record("axum", 15).await.unwrap();
        assert!(last.id > 0);

        let recent = store.recent(20).await.unwrap();
        assert_eq!(recent.len(), 3);
        // Newest first; ids break ties within the same second.
        assert_eq!(recent[0].query, "axum");
        assert_eq!(recent[2].query, "rust web");
    }

    #[tokio::test]
    async fn test_recent_respects_limit() {
        let (store, _dir) = setup_store().await;

        for i in 0..5 {
            store.record(&format!("query-{i}"), i).await.unwrap();
        }

        let recent = store.recent(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "query-4");
    }
}
