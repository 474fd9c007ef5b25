//! API error types with the dashboard's JSON error shapes.
//!
//! Two wire shapes, both fixed by the frontend contract: a 404 is a
//! bare `{"message": ...}`, every other failure is
//! `{"status": "error", "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DatabaseError;
use crate::sync::SyncError;

/// Error envelope for 5xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

/// Body for 404 responses. No `status` field, matching what the
/// dashboard's not-found handling expects.
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(NotFoundBody { message })).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(%message, "API internal error");
                let body = ErrorBody {
                    status: "error",
                    message,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        match err {
            // A missing target ("{name} not found") is a 404, not a
            // server fault.
            SyncError::TargetNotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    use crate::provider::ProviderError;

    #[tokio::test]
    async fn not_found_returns_bare_message_body() {
        let response = ApiError::NotFound("No patient found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "No patient found");
        assert!(json.get("status").is_none());
    }

    #[tokio::test]
    async fn internal_returns_error_envelope_with_detail() {
        let response = ApiError::Internal("disk I/O error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "disk I/O error");
    }

    #[tokio::test]
    async fn database_error_maps_to_internal() {
        let api_err: ApiError = DatabaseError::MigrationFailed {
            version: 1,
            reason: "syntax error".into(),
        }
        .into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn sync_target_not_found_maps_to_404() {
        let api_err: ApiError = SyncError::TargetNotFound {
            name: "Jessica Taylor".into(),
        }
        .into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Jessica Taylor not found");
    }

    #[tokio::test]
    async fn sync_provider_failure_maps_to_500() {
        let api_err: ApiError = SyncError::Provider(ProviderError::Timeout(30)).into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
