use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use std::sync::{Arc, Once};
use std::time::{SystemTime, UNIX_EPOCH};
use once_cell::sync::OnceCell;

use ibd_care_domain::health::{
    ComponentStatus as DomainComponentStatus, HealthServiceTrait, SystemStatus,
};

/// Health check response model with system information
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Current service status ("ok", "degraded", or "error")
    pub status: String,
    /// Current application version from Cargo manifest
    pub version: String,
    /// Timestamp of when the response was generated
    pub timestamp: u64,
    /// Uptime of the service in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Details about various components of the system
    pub components: ComponentStatus,
    /// Environment information
    pub environment: String,
}

/// Status of individual system components
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// In-process storage status
    pub storage: ComponentHealthStatus,
    /// API status
    pub api: ComponentHealthStatus,
}

/// Health status for an individual component
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthStatus {
    /// Status of the component ("ok", "degraded", or "error")
    pub status: String,
    /// Optional message with more details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// Track the time when the server started using a thread-safe OnceCell
static SERVER_START_TIME: OnceCell<u64> = OnceCell::new();
static INIT: Once = Once::new();

// Initialize the server start time
pub fn initialize_server_start_time() {
    INIT.call_once(|| {
        let start_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let _ = SERVER_START_TIME.set(start_time);
    });
}

/// Health check endpoint to verify the API is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API is healthy", body = HealthResponse),
        (status = 500, description = "API is not healthy", body = HealthResponse),
        (status = 503, description = "API is degraded", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument]
pub async fn health_check(
    Extension(health_service): Extension<Arc<dyn HealthServiceTrait + Send + Sync>>,
) -> impl IntoResponse {
    info!("Health check requested");

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let uptime = SERVER_START_TIME
        .get()
        .map(|&start_time| now.saturating_sub(start_time));

    let system_health = health_service.get_system_health().await;

    let overall_status = match system_health.status {
        SystemStatus::Healthy => "ok",
        SystemStatus::Degraded => "degraded",
        SystemStatus::Unhealthy => "error",
    };

    let components = ComponentStatus {
        storage: component_health(&system_health, "storage"),
        api: component_health(&system_health, "api"),
    };

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime,
        components,
        environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
    };

    match overall_status {
        "ok" => (StatusCode::OK, Json(response)),
        "degraded" => (StatusCode::SERVICE_UNAVAILABLE, Json(response)),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(response)),
    }
}

/// Extract the API-facing status of a named component
fn component_health(
    system_health: &ibd_care_domain::health::SystemHealth,
    name: &str,
) -> ComponentHealthStatus {
    let component = system_health.components.get(name);

    ComponentHealthStatus {
        status: map_component_status(
            &component
                .map(|c| c.status.clone())
                .unwrap_or(DomainComponentStatus::Healthy),
        ),
        message: component.and_then(|c| c.details.clone()),
    }
}

/// Map domain component status to API status string
fn map_component_status(status: &DomainComponentStatus) -> String {
    match status {
        DomainComponentStatus::Healthy => "ok",
        DomainComponentStatus::Degraded => "degraded",
        DomainComponentStatus::Unhealthy => "error",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use ibd_care_domain::health::create_health_service;

    #[tokio::test]
    async fn test_health_check_response() {
        initialize_server_start_time();

        let health_service = create_health_service();

        let response = health_check(Extension(health_service)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
