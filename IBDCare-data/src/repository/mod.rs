// Repository module structure
pub mod errors;
mod journal;
mod medication;
mod in_memory;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use journal::{JournalRepository, JournalRepositoryTrait};
pub use medication::{MedicationRepository, MedicationRepositoryTrait};

// Re-export test modules for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use journal::tests as journal_tests;
#[cfg(any(test, feature = "mock"))]
pub use medication::tests as medication_tests;
