// API module structure
pub mod handlers;
pub mod routes;
