use axum::{
    routing::{get, post, put},
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use ibd_care_domain::health::create_health_service;

use crate::api::handlers::{adherence, assessment, health, journal, AppState};
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub async fn create_app() -> Router {
    debug!("Creating application router");

    // Application state holding the journal and adherence services
    let state = AppState::create_default();

    // Create health service using factory function
    let health_service = create_health_service();

    // Set up API routes. Specific routes come before their prefix routes
    // to avoid conflicts.
    let api_routes = Router::new()
        .route("/journal/assessment", get(assessment::get_assessment))
        .route(
            "/journal/diagnosis",
            get(journal::get_diagnosis).put(journal::set_diagnosis),
        )
        .route(
            "/journal",
            get(journal::get_journal_history).post(journal::create_journal_entry),
        )
        .route("/targets/sources", get(assessment::get_research_sources))
        .route("/medications/intake", post(adherence::record_intake))
        .route("/medications/schedule", put(adherence::upsert_schedule))
        .route("/medications/adherence", get(adherence::get_adherence_report));

    debug!("API routes configured");

    // Set up public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    // Combine all routes
    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    debug!("API routes nested");

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check service startup time
    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}
