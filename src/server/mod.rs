//! Web API server proxying GitHub repository search for client apps.
//!
//! Clients talk to this server instead of GitHub directly, so tokens and
//! rate-limit handling stay server-side. Search and detail responses are
//! cached into the local store on the way through.

mod error;
mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::github::GithubClient;
use crate::store::{RepositoryStore, SearchHistoryStore};

/// Shared state for the web server, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub github: GithubClient,
    pub repos: Arc<RepositoryStore>,
    pub history: Arc<SearchHistoryStore>,
    /// When false, search/detail handlers skip the local store entirely
    /// (stateless passthrough mode).
    pub persistence: bool,
}

impl AppState {
    pub fn new(settings: &Settings, persistence: bool) -> Self {
        let ctx = settings.create_db_context();

        Self {
            github: GithubClient::new(settings.github_token.clone()),
            repos: Arc::new(ctx.repositories()),
            history: Arc::new(ctx.search_history()),
            persistence,
        }
    }
}

/// Start the web server.
pub async fn serve(
    settings: &Settings,
    host: &str,
    port: u16,
    persistence: bool,
) -> anyhow::Result<()> {
    let state = AppState::new(settings, persistence);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
