// IBDCare data layer
// Storage models and repositories for journal entries, diagnoses and
// medication intake records.

pub mod models;
pub mod repository;
