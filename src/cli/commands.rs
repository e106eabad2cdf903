//! CLI commands implementation.

use clap::{Parser, Subcommand};
use console::style;

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "gitscope")]
#[command(about = "GitHub repository search proxy and local cache")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema
    Init,

    /// Start the API server
    Serve {
        /// Bind address: a port, a host, or host:port
        #[arg(short, long)]
        bind: Option<String>,
        /// Proxy without caching (skips the local store on search/detail)
        #[arg(long, env = "GITSCOPE_STATELESS")]
        stateless: bool,
    },

    /// Show stored repository and search history counts
    Status,
}

/// Parse CLI arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env();

    match cli.command {
        Commands::Init => cmd_init(&settings).await,
        Commands::Serve { bind, stateless } => cmd_serve(&settings, bind.as_deref(), !stateless).await,
        Commands::Status => cmd_status(&settings).await,
    }
}

/// Initialize the database schema.
async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Database initialization failed: {}", e))?;

    println!(
        "{} Database ready at {}",
        style("✓").green(),
        ctx.pool().database_url()
    );
    Ok(())
}

/// Start the web server.
async fn cmd_serve(
    settings: &Settings,
    bind: Option<&str>,
    persistence: bool,
) -> anyhow::Result<()> {
    let (host, port) = match bind {
        Some(bind) => parse_bind_address(bind, settings.port)?,
        None => ("0.0.0.0".to_string(), settings.port),
    };

    println!("{} Preparing database...", style("→").cyan());
    let ctx = settings.create_db_context();
    match ctx.init_schema().await {
        Ok(()) => {
            println!("  {} Database ready", style("✓").green());
        }
        Err(e) => {
            eprintln!("  {} Schema setup failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database initialization failed: {}", e));
        }
    }

    if settings.github_token.is_none() {
        println!(
            "  {} GITHUB_TOKEN not set - GitHub rate limits will apply",
            style("!").yellow()
        );
    }
    if !persistence {
        println!("  {} Running stateless (no local cache)", style("!").yellow());
    }

    println!(
        "{} Starting gitscope server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port, persistence).await
}

/// Show stored counts.
async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let ctx = settings.create_db_context();
    ctx.init_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Database initialization failed: {}", e))?;

    let repo_count = ctx.repositories().count().await?;
    let recent = ctx.search_history().recent(1).await?;

    println!("{} gitscope status", style("→").cyan());
    println!("  Repositories cached: {}", repo_count);
    match recent.first() {
        Some(entry) => println!(
            "  Last search: {:?} ({} results) at {}",
            entry.query,
            entry.results_count,
            entry.created_at.to_rfc3339()
        ),
        None => println!("  Last search: none"),
    }
    println!(
        "  GitHub token configured: {}",
        settings.github_token.is_some()
    );

    Ok(())
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 0.0.0.0:3030
/// - Just a host: "127.0.0.1" -> 127.0.0.1:<default>
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
fn parse_bind_address(bind: &str, default_port: u16) -> anyhow::Result<(String, u16)> {
    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("0.0.0.0".to_string(), port));
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    // Must be just a host, use the default port
    Ok((bind.to_string(), default_port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("3030", 5001).unwrap(),
            ("0.0.0.0".to_string(), 3030)
        );
        assert_eq!(
            parse_bind_address("127.0.0.1", 5001).unwrap(),
            ("127.0.0.1".to_string(), 5001)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:8080", 5001).unwrap(),
            ("0.0.0.0".to_string(), 8080)
        );
    }
}
