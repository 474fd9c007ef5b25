//! Dashboard API.
//!
//! Exposes the patient store as HTTP endpoints for the dashboard
//! frontend. Routes are nested under `/api/`.
//!
//! The router is composable: `dashboard_api_router()` returns a
//! `Router` that can be mounted on any axum server instance, and
//! `start_api_server()` runs one with graceful shutdown.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::dashboard_api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;
