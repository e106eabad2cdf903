//! Runtime settings loaded from the environment.
//!
//! Three knobs: an optional GitHub token (absence just lowers upstream rate
//! limits), the database location, and the bind port. `.env` files are
//! loaded by `main` before these are read.

use crate::store::DbContext;

/// Default bind port.
pub const DEFAULT_PORT: u16 = 5001;

/// Default SQLite database path.
pub const DEFAULT_DATABASE_URL: &str = "gitscope.db";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Token for authenticated GitHub requests. Optional.
    pub github_token: Option<String>,
    /// SQLite database URL or file path.
    pub database_url: String,
    /// Port the server binds when no explicit bind address is given.
    pub port: u16,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        let github_token = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            github_token,
            database_url,
            port,
        }
    }

    /// Create a database context for these settings.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url)
    }
}
