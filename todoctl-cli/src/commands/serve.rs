//! HTTP server command
//!
//! Opens the database pool, ensures the `todos` table exists and runs the
//! server until shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use todoctl_server::db::{create_pool_with_options, create_tables};
use todoctl_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Database URL, e.g. sqlite://todos.db or sqlite::memory:
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://todos.db")]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting todoctl server on {}", args.bind);

    let pool = create_pool_with_options(&args.database_url, args.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", args.database_url))?;

    create_tables(&pool)
        .await
        .context("Failed to create todos table")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
