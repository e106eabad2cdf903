//! Repository search endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::super::error::ApiError;
use super::super::AppState;
use crate::github::SearchResults;
use crate::models::Repository;

/// Upstream search results are capped per page for mobile clients.
const MAX_PER_PAGE: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Search GitHub repositories, caching every result locally.
///
/// The upstream response is reshaped into the stable client schema. When
/// persistence fails the search response is still returned from the data
/// already fetched; only the cache misses out.
pub async fn search_repositories(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let query = params.q.as_deref().unwrap_or("");
    if query.is_empty() {
        return Err(ApiError::Validation("Query parameter is required"));
    }

    let page = params.page.unwrap_or(1).max(1).to_string();
    let per_page = params
        .per_page
        .unwrap_or(30)
        .min(MAX_PER_PAGE)
        .to_string();
    let sort = params.sort.as_deref().unwrap_or("best-match");
    let order = params.order.as_deref().unwrap_or("desc");

    // "best-match" is GitHub's implicit default; sending it is an error.
    let explicit_sort = (sort != "best-match").then_some(sort);

    let data = state
        .github
        .get_json(
            "search/repositories",
            &[
                ("q", Some(query)),
                ("sort", explicit_sort),
                ("order", explicit_sort.is_some().then_some(order)),
                ("page", Some(page.as_str())),
                ("per_page", Some(per_page.as_str())),
            ],
        )
        .await
        .map_err(|_| ApiError::Upstream)?;

    let results: SearchResults =
        serde_json::from_value(data).map_err(|_| ApiError::Upstream)?;

    let repositories = if state.persistence {
        match state.repos.upsert_all(&results.items).await {
            Ok(saved) => saved.iter().map(Repository::to_payload).collect::<Vec<_>>(),
            Err(e) => {
                tracing::error!("failed to cache search results: {}", e);
                passthrough_payloads(&results)
            }
        }
    } else {
        passthrough_payloads(&results)
    };

    if state.persistence {
        if let Err(e) = state.history.record(query, results.total_count).await {
            tracing::error!("failed to record search history: {}", e);
        }
    }

    Ok(Json(json!({
        "total_count": results.total_count,
        "incomplete_results": results.incomplete_results,
        "repositories": repositories,
    })))
}

/// Reshape raw search items without touching the store.
fn passthrough_payloads(results: &SearchResults) -> Vec<serde_json::Value> {
    results
        .items
        .iter()
        .map(|raw| Repository::reconcile(None, raw).to_payload())
        .collect()
}
