//! Repository detail and passthrough endpoints.

use axum::extract::{Path, State};
use axum::Json;

use super::super::error::ApiError;
use super::super::AppState;
use crate::models::{RawRepository, Repository};

/// Get detailed repository information, caching it locally.
pub async fn repository_detail(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let data = state
        .github
        .get_json(&format!("repos/{}/{}", owner, repo), &[])
        .await
        .map_err(|_| ApiError::NotFound("Repository not found"))?;

    let raw: RawRepository =
        serde_json::from_value(data).map_err(|_| ApiError::NotFound("Repository not found"))?;

    let repository = if state.persistence {
        match state.repos.upsert(&raw).await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::error!("failed to cache repository: {}", e);
                Repository::reconcile(None, &raw)
            }
        }
    } else {
        Repository::reconcile(None, &raw)
    };

    Ok(Json(repository.to_payload()))
}

/// Get repository contents at the root.
pub async fn repository_contents(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    passthrough(
        &state,
        &format!("repos/{}/{}/contents", owner, repo),
        "Contents not found",
    )
    .await
}

/// Get repository contents at a path.
pub async fn repository_contents_path(
    State(state): State<AppState>,
    Path((owner, repo, path)): Path<(String, String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    passthrough(
        &state,
        &format!("repos/{}/{}/contents/{}", owner, repo, path),
        "Contents not found",
    )
    .await
}

/// Get repository language byte counts.
pub async fn repository_languages(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    passthrough(
        &state,
        &format!("repos/{}/{}/languages", owner, repo),
        "Languages data not found",
    )
    .await
}

/// Get repository view traffic.
pub async fn repository_views(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    passthrough(
        &state,
        &format!("repos/{}/{}/traffic/views", owner, repo),
        "Traffic data not available",
    )
    .await
}

/// Get repository clone traffic.
pub async fn repository_clones(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    passthrough(
        &state,
        &format!("repos/{}/{}/traffic/clones", owner, repo),
        "Traffic data not available",
    )
    .await
}

/// Forward an upstream JSON document unmodified.
async fn passthrough(
    state: &AppState,
    endpoint: &str,
    missing: &'static str,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .github
        .get_json(endpoint, &[])
        .await
        .map(Json)
        .map_err(|_| ApiError::NotFound(missing))
}
