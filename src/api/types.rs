//! Shared types for the API layer.

use std::sync::Arc;

use serde::Serialize;

use crate::config::AppConfig;
use crate::db::Database;
use crate::provider::PatientSource;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the dashboard API router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
///
/// Cloned per request by axum. The database handle opens a fresh
/// connection per use, so nothing here is a shared mutable resource;
/// the provider client is injected so tests can swap in a mock.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn PatientSource>,
}

impl ApiContext {
    pub fn new(db: Database, config: Arc<AppConfig>, provider: Arc<dyn PatientSource>) -> Self {
        Self {
            db,
            config,
            provider,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Response envelopes
// ═══════════════════════════════════════════════════════════

/// Standard success envelope: `{"status": "success", "data": ...}`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_envelope_serializes_with_success_status() {
        let envelope = DataEnvelope::new(vec![1, 2, 3]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
