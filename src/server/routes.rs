//! Router configuration for the API server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Search
        .route(
            "/api/search/repositories",
            get(handlers::search_repositories),
        )
        .route("/api/search/history", get(handlers::search_history))
        // Locally cached repositories
        .route("/api/repositories/saved", get(handlers::saved_repositories))
        // Repository detail and passthrough endpoints
        .route(
            "/api/repositories/:owner/:repo",
            get(handlers::repository_detail),
        )
        .route(
            "/api/repositories/:owner/:repo/contents",
            get(handlers::repository_contents),
        )
        .route(
            "/api/repositories/:owner/:repo/contents/*path",
            get(handlers::repository_contents_path),
        )
        .route(
            "/api/repositories/:owner/:repo/languages",
            get(handlers::repository_languages),
        )
        .route(
            "/api/repositories/:owner/:repo/traffic/views",
            get(handlers::repository_views),
        )
        .route(
            "/api/repositories/:owner/:repo/traffic/clones",
            get(handlers::repository_clones),
        )
        // Health
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
