// Public entities for the IBDCare API
// This module contains data structures that are shared across the application boundary

// Journal entities
pub mod journal;

// Medication entities
pub mod medication;

// Common entities for error handling, pagination, etc.
pub mod common;
