//! Careboard server binary.
//!
//! Wires configuration, the SQLite store, the provider client, and
//! the API server together, then parks on Ctrl-C.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use careboard::api::{start_api_server, ApiContext};
use careboard::config::{self, AppConfig};
use careboard::db::{count_tables, Database};
use careboard::provider::CoalitionClient;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Careboard starting v{}", config::APP_VERSION);

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(parent) = config.database_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::error!("Cannot create data directory {}: {e}", parent.display());
            return ExitCode::FAILURE;
        }
    }

    // Open once up front so migration failures surface before the
    // server starts taking requests.
    let db = Database::new(&config.database_path);
    match db.open() {
        Ok(conn) => {
            let tables = count_tables(&conn).unwrap_or(0);
            tracing::info!(
                path = %config.database_path.display(),
                tables,
                "Database ready"
            );
        }
        Err(e) => {
            tracing::error!(
                "Cannot open database {}: {e}",
                config.database_path.display()
            );
            return ExitCode::FAILURE;
        }
    }

    let provider = Arc::new(CoalitionClient::from_config(&config));
    let bind_addr = config.bind_addr;
    let ctx = ApiContext::new(db, Arc::new(config), provider);

    let mut server = match start_api_server(ctx, bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Server running on http://{}", server.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    tracing::info!("Shutting down");

    server.shutdown();
    server.wait().await;

    ExitCode::SUCCESS
}
