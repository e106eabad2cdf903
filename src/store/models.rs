//! Diesel ORM models for database tables.
//!
//! Row structs mirror the TEXT-based SQLite schema; conversion helpers
//! translate between rows and the domain models in `crate::models`.

use diesel::prelude::*;

use super::{parse_datetime, parse_datetime_opt};
use crate::models::{License, Repository, SearchRecord};
use crate::schema;

/// Repository row, readable and writable as one unit.
///
/// Upserts write the whole row via `replace_into`, so there is never a
/// partially updated record visible to concurrent readers.
#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = schema::repositories)]
#[diesel(primary_key(github_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RepositoryRow {
    pub github_id: i64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub language: Option<String>,
    pub stars_count: i64,
    pub forks_count: i64,
    pub watchers_count: i64,
    pub open_issues_count: i64,
    pub default_branch: String,
    pub topics: String,
    pub owner_login: String,
    pub owner_avatar_url: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub is_private: bool,
    pub is_fork: bool,
    pub archived: bool,
    pub disabled: bool,
    pub size: i64,
    pub license_name: Option<String>,
    pub license_spdx_id: Option<String>,
}

impl RepositoryRow {
    pub fn from_model(repo: &Repository) -> Self {
        Self {
            github_id: repo.github_id,
            name: repo.name.clone(),
            full_name: repo.full_name.clone(),
            description: repo.description.clone(),
            html_url: repo.html_url.clone(),
            clone_url: repo.clone_url.clone(),
            ssh_url: repo.ssh_url.clone(),
            language: repo.language.clone(),
            stars_count: repo.stars_count,
            forks_count: repo.forks_count,
            watchers_count: repo.watchers_count,
            open_issues_count: repo.open_issues_count,
            default_branch: repo.default_branch.clone(),
            topics: serde_json::to_string(&repo.topics).unwrap_or_else(|_| "[]".to_string()),
            owner_login: repo.owner_login.clone(),
            owner_avatar_url: repo.owner_avatar_url.clone(),
            created_at: repo.created_at.map(|dt| dt.to_rfc3339()),
            updated_at: repo.updated_at.map(|dt| dt.to_rfc3339()),
            pushed_at: repo.pushed_at.map(|dt| dt.to_rfc3339()),
            is_private: repo.is_private,
            is_fork: repo.is_fork,
            archived: repo.archived,
            disabled: repo.disabled,
            size: repo.size,
            license_name: repo.license.as_ref().and_then(|l| l.name.clone()),
            license_spdx_id: repo.license.as_ref().and_then(|l| l.spdx_id.clone()),
        }
    }

    pub fn into_model(self) -> Repository {
        let license = if self.license_name.is_some() || self.license_spdx_id.is_some() {
            Some(License {
                name: self.license_name,
                spdx_id: self.license_spdx_id,
            })
        } else {
            None
        };

        Repository {
            github_id: self.github_id,
            name: self.name,
            full_name: self.full_name,
            description: self.description,
            html_url: self.html_url,
            clone_url: self.clone_url,
            ssh_url: self.ssh_url,
            language: self.language,
            stars_count: self.stars_count,
            forks_count: self.forks_count,
            watchers_count: self.watchers_count,
            open_issues_count: self.open_issues_count,
            default_branch: self.default_branch,
            topics: serde_json::from_str(&self.topics).unwrap_or_default(),
            owner_login: self.owner_login,
            owner_avatar_url: self.owner_avatar_url,
            created_at: parse_datetime_opt(self.created_at),
            updated_at: parse_datetime_opt(self.updated_at),
            pushed_at: parse_datetime_opt(self.pushed_at),
            is_private: self.is_private,
            is_fork: self.is_fork,
            archived: self.archived,
            disabled: self.disabled,
            size: self.size,
            license,
        }
    }
}

/// Search history row from the database.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = schema::search_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SearchHistoryRow {
    pub id: i64,
    pub query: String,
    pub results_count: i64,
    pub created_at: String,
}

impl SearchHistoryRow {
    pub fn into_model(self) -> SearchRecord {
        SearchRecord {
            id: self.id,
            query: self.query,
            results_count: self.results_count,
            created_at: parse_datetime(&self.created_at),
        }
    }
}

/// New search history entry for insertion.
#[derive(Insertable, Debug)]
#[diesel(table_name = schema::search_history)]
pub struct NewSearchRecord<'a> {
    pub query: &'a str,
    pub results_count: i64,
    pub created_at: &'a str,
}
