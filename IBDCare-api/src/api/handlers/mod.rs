// Handler modules for the public API
pub mod adherence;
pub mod assessment;
pub mod health;
pub mod journal;

use std::sync::Arc;
use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use ibd_care_domain::services::{
    create_default_adherence_service, create_default_journal_service, AdherenceServiceTrait,
    JournalServiceTrait,
};

/// Shared application state with the domain services the handlers call
#[derive(Clone)]
pub struct AppState {
    /// Journal service for entries, diagnoses and assessments
    pub journal: Arc<dyn JournalServiceTrait + Send + Sync>,
    /// Adherence service for intake records and reports
    pub adherence: Arc<dyn AdherenceServiceTrait + Send + Sync>,
}

impl AppState {
    /// Create application state backed by the default services
    pub fn create_default() -> Self {
        Self {
            journal: Arc::new(create_default_journal_service()),
            adherence: Arc::new(create_default_adherence_service()),
        }
    }
}

/// Error response format for API
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code - machine-readable identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a not found error response
    pub fn not_found(resource: &str) -> Self {
        Self {
            error: "not_found".to_string(),
            message: format!("The requested {} could not be found", resource),
            details: None,
        }
    }

    /// Create a validation error response
    pub fn validation_error(message: &str, details: Option<serde_json::Value>) -> Self {
        Self {
            error: "validation_error".to_string(),
            message: message.to_string(),
            details,
        }
    }

    /// Create a bad request error response
    pub fn bad_request(message: &str) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Create an internal error response
    pub fn internal_error() -> Self {
        Self {
            error: "internal_error".to_string(),
            message: "An unexpected error occurred".to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status = match self.error.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "validation_error" => StatusCode::BAD_REQUEST,
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}
