// Services module structure
pub mod activity;
pub mod adherence;
pub mod journal;
pub mod orchestration;
pub mod targets;

// Re-export commonly used service types
pub use activity::assess_disease_activity;
pub use adherence::calculate_adherence;
pub use journal::{
    create_default_journal_service, JournalService, JournalServiceError, JournalServiceTrait,
};
pub use orchestration::{
    create_default_adherence_service, AdherenceService, AdherenceServiceError,
    AdherenceServiceTrait,
};
