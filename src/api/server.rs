//! API server lifecycle — starts and stops the axum HTTP server that
//! serves the dashboard API.
//!
//! Pattern: bind → spawn background task → return handle with a
//! shutdown channel. The handle owns the join handle so callers can
//! wait for the listener task to finish after signalling shutdown.

use std::net::SocketAddr;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::api::router::dashboard_api_router;
use crate::api::types::ApiContext;

/// Handle to a running API server.
pub struct ApiServer {
    /// The address the listener actually bound (resolves port 0).
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }

    /// Wait for the server task to finish.
    pub async fn wait(self) {
        let _ = self.handle.await;
    }
}

/// Start the API server on the given address.
///
/// Binds the listener, mounts `dashboard_api_router()`, and spawns
/// the axum server in a background tokio task. Returns an `ApiServer`
/// handle carrying the bound address and a shutdown channel.
pub async fn start_api_server(
    ctx: ApiContext,
    bind_addr: SocketAddr,
) -> Result<ApiServer, String> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("Failed to bind API server on {bind_addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    tracing::info!(%addr, "API server binding");

    let app = dashboard_api_router(ctx);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("API server received shutdown signal");
        };

        tracing::info!(%addr, "API server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }

        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
        handle,
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::AppConfig;
    use crate::db::Database;
    use crate::provider::MockPatientSource;

    fn test_ctx() -> (ApiContext, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let db = Database::new(tmp.path().join("careboard.db"));
        db.open().unwrap();
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            database_path: std::path::PathBuf::new(),
            provider_url: "http://127.0.0.1:1/patients".to_string(),
            provider_username: "coalition".to_string(),
            provider_password: "skills-test".to_string(),
            provider_timeout_secs: 5,
            default_patient_name: "Jessica Taylor".to_string(),
        };
        let ctx = ApiContext::new(
            db,
            Arc::new(config),
            Arc::new(MockPatientSource::new(vec![])),
        );
        (ctx, tmp)
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_api_server(ctx, "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");

        assert!(server.addr.port() > 0);

        let url = format!("http://{}/api/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn server_serves_api_routes() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_api_server(ctx, "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");

        // Unknown route returns 404
        let url = format!("http://{}/nonexistent", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        // Empty store: list succeeds, detail misses
        let url = format!("http://{}/api/patient/list", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        let url = format!("http://{}/api/patient/1", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.shutdown();
        server.wait().await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let (ctx, _tmp) = test_ctx();
        let mut server = start_api_server(ctx, "127.0.0.1:0".parse().unwrap())
            .await
            .expect("server should start");

        server.shutdown();
        server.shutdown(); // Second call should be safe
    }
}
