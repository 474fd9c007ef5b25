//! Dashboard API router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`. There is no auth layer:
//! the server binds to loopback by default and the feed it mirrors is
//! public demo data.

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the dashboard API router.
///
/// NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
/// Static segments win over the capture, so `/patient/list` and
/// `/patient/fetch` never reach the `:id` handler.
pub fn dashboard_api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/patient", get(endpoints::patients::default_detail))
        .route("/patient/list", get(endpoints::patients::list))
        .route("/patient/fetch", get(endpoints::sync::fetch))
        .route("/patient/:id", get(endpoints::patients::detail))
        .with_state(ctx);

    // The dashboard frontend is served from a different origin during
    // development, so CORS stays permissive.
    Router::new()
        .nest("/api", routes)
        .layer(CorsLayer::permissive())
}
