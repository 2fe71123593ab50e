//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;
use async_trait::async_trait;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;
}

/// Default health service backed by the in-process storage
#[derive(Debug, Default)]
pub struct HealthService;

impl HealthService {
    /// Create a new health service
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HealthServiceTrait for HealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        // The in-memory storage has no external connection to probe; it is
        // healthy as long as the process is running.
        components.insert(
            "storage".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: Some("in-memory storage".to_string()),
            },
        );
        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        SystemHealth {
            status: SystemStatus::Healthy,
            components,
        }
    }
}

/// Create a default health service
pub fn create_health_service() -> std::sync::Arc<dyn HealthServiceTrait + Send + Sync> {
    std::sync::Arc::new(HealthService::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_health_service_is_healthy() {
        let service = HealthService::new();
        let health = service.get_system_health().await;

        assert_eq!(health.status, SystemStatus::Healthy);
        assert!(health.components.contains_key("storage"));
        assert!(health.components.contains_key("api"));
    }
}
