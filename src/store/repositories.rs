//! Repository store: create-or-update by GitHub id, plus read queries.

use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl};

use super::models::RepositoryRow;
use super::pool::{AsyncSqliteConnection, AsyncSqlitePool, DieselError};
use crate::models::{RawRepository, Repository};
use crate::schema::repositories;

/// One page of saved repositories.
#[derive(Debug, Clone)]
pub struct SavedPage {
    pub repositories: Vec<Repository>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u32,
}

/// Diesel-based repository store with compile-time query checking.
#[derive(Clone)]
pub struct RepositoryStore {
    pool: AsyncSqlitePool,
}

impl RepositoryStore {
    /// Create a new repository store.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Count all stored repositories.
    pub async fn count(&self) -> Result<u64, DieselError> {
        let mut conn = self.pool.get().await?;

        use diesel::dsl::count_star;
        let count: i64 = repositories::table
            .select(count_star())
            .first(&mut conn)
            .await?;

        Ok(count as u64)
    }

    /// Get a repository by its GitHub id.
    pub async fn get(&self, github_id: i64) -> Result<Option<Repository>, DieselError> {
        let mut conn = self.pool.get().await?;

        let row: Option<RepositoryRow> = repositories::table
            .find(github_id)
            .first(&mut conn)
            .await
            .optional()?;

        Ok(row.map(RepositoryRow::into_model))
    }

    /// Get a repository by its "owner/name" pair.
    pub async fn get_by_full_name(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Option<Repository>, DieselError> {
        let mut conn = self.pool.get().await?;

        let full_name = format!("{}/{}", owner, name);
        let row: Option<RepositoryRow> = repositories::table
            .filter(repositories::full_name.eq(&full_name))
            .first(&mut conn)
            .await
            .optional()?;

        Ok(row.map(RepositoryRow::into_model))
    }

    /// Create or update one repository from an upstream payload.
    ///
    /// Returns the reconciled record as stored.
    pub async fn upsert(&self, raw: &RawRepository) -> Result<Repository, DieselError> {
        let mut conn = self.pool.get().await?;
        Self::upsert_with(&mut conn, raw).await
    }

    /// Upsert a batch of payloads in a single transaction.
    ///
    /// On error the whole batch rolls back: no record from the batch is
    /// guaranteed saved, which is exactly what callers must assume.
    pub async fn upsert_all(&self, raws: &[RawRepository]) -> Result<Vec<Repository>, DieselError> {
        let mut conn = self.pool.get().await?;

        conn.transaction(|conn| {
            Box::pin(async move {
                let mut saved = Vec::with_capacity(raws.len());
                for raw in raws {
                    saved.push(Self::upsert_with(conn, raw).await?);
                }
                Ok(saved)
            })
        })
        .await
    }

    /// List stored repositories ordered by descending star count.
    ///
    /// `language`, when present, matches the primary language
    /// case-insensitively as a substring. Pages are 1-based; a page past
    /// the end yields an empty list rather than an error.
    pub async fn list_saved(
        &self,
        language: Option<&str>,
        page: u32,
        per_page: u32,
    ) -> Result<SavedPage, DieselError> {
        let mut conn = self.pool.get().await?;

        let page = page.max(1);
        let per_page = per_page.max(1) as i64;
        let offset = (page as i64 - 1) * per_page;

        use diesel::dsl::count_star;
        let mut count_query = repositories::table.select(count_star()).into_boxed();
        if let Some(lang) = language {
            count_query =
                count_query.filter(repositories::language.like(format!("%{}%", lang)));
        }
        let total: i64 = count_query.first(&mut conn).await?;

        let mut query = repositories::table
            .order((
                repositories::stars_count.desc(),
                repositories::github_id.asc(),
            ))
            .limit(per_page)
            .offset(offset)
            .into_boxed();
        if let Some(lang) = language {
            query = query.filter(repositories::language.like(format!("%{}%", lang)));
        }
        let rows: Vec<RepositoryRow> = query.load(&mut conn).await?;

        let pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };

        Ok(SavedPage {
            repositories: rows.into_iter().map(RepositoryRow::into_model).collect(),
            total: total as u64,
            pages: pages as u64,
            current_page: page,
        })
    }

    /// Reconcile and write one record inside an existing connection.
    ///
    /// The write is a whole-row `replace_into` keyed on `github_id`, so
    /// concurrent upserts of the same id resolve last-writer-wins without
    /// ever exposing a half-updated row.
    async fn upsert_with(
        conn: &mut AsyncSqliteConnection,
        raw: &RawRepository,
    ) -> Result<Repository, DieselError> {
        let previous: Option<RepositoryRow> = repositories::table
            .find(raw.id)
            .first(conn)
            .await
            .optional()?;
        let previous = previous.map(RepositoryRow::into_model);

        let merged = Repository::reconcile(previous.as_ref(), raw);

        diesel::replace_into(repositories::table)
            .values(RepositoryRow::from_model(&merged))
            .execute(conn)
            .await?;

        Ok(merged)
    }
}
