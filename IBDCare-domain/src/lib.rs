// IBDCare Domain
// This crate contains the business logic for the IBDCare application:
// the clinical-scoring core (disease-activity classification, evidence-based
// targets, medication adherence) and the repository-backed services that
// drive it.

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
