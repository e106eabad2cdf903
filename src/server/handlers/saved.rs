//! Saved repositories and search history endpoints.
//!
//! These serve locally stored data only; a store failure here is a real
//! 500, unlike on the search path where the store is best-effort.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::super::error::ApiError;
use super::super::AppState;
use crate::models::Repository;

/// History responses are capped at the most recent entries.
const HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct SavedParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub language: Option<String>,
}

/// List locally cached repositories, most-starred first.
pub async fn saved_repositories(
    State(state): State<AppState>,
    Query(params): Query<SavedParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(30);

    let saved = state
        .repos
        .list_saved(params.language.as_deref(), page, per_page)
        .await?;

    let repositories: Vec<_> = saved
        .repositories
        .iter()
        .map(Repository::to_payload)
        .collect();

    Ok(Json(json!({
        "repositories": repositories,
        "total": saved.total,
        "pages": saved.pages,
        "current_page": saved.current_page,
    })))
}

/// Recent search history, newest first.
pub async fn search_history(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let entries = state.history.recent(HISTORY_LIMIT).await?;

    let payload: Vec<_> = entries.iter().map(|e| e.to_payload()).collect();
    Ok(Json(json!(payload)))
}
