//! gitscope - GitHub repository search proxy and local cache.
//!
//! A backend for mobile and web clients that proxies GitHub's REST API,
//! keeping tokens and rate-limit handling server-side while caching every
//! repository it sees.

mod cli;
mod config;
mod github;
mod models;
mod schema;
mod server;
mod store;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "gitscope=info"
    } else {
        "gitscope=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    cli::run().await
}
