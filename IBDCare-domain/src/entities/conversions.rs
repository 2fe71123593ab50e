use uuid::Uuid;

use crate::entities::journal::{CreateJournalEntryRequest, JournalEntry, UserDiagnosis};
use crate::entities::medication::{
    CreateIntakeRequest, MedicationFrequency, MedicationIntakeRecord, MedicationSchedule,
};
use chrono::{DateTime, Utc};

/// Conversion functions between domain entities and data models.
/// These functions follow the pattern convert_to_[target_layer]_[model_name].

/// Helper function to safely parse a string ID to UUID
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Convert from data model to domain entity for a journal entry
pub fn convert_to_domain_entry(data_entry: ibd_care_data::models::journal::JournalEntry) -> JournalEntry {
    JournalEntry {
        id: data_entry.id,
        user_id: data_entry.user_id,
        entry_date: data_entry.entry_date,
        blood_present: data_entry.blood_present,
        mucus_present: data_entry.mucus_present,
        pain_severity: data_entry.pain_severity,
        urgency_level: data_entry.urgency_level,
        bowel_frequency: data_entry.bowel_frequency,
        bristol_scale: data_entry.bristol_scale,
        stress_level: data_entry.stress_level,
        fatigue_level: data_entry.fatigue_level,
        sleep_quality: data_entry.sleep_quality,
        water_intake_ml: data_entry.water_intake_ml,
        meals_logged: data_entry.meals_logged,
        medication_taken: data_entry.medication_taken,
        notes: data_entry.notes,
        recorded_at: data_entry.recorded_at,
    }
}

/// Convert from domain request to data model for a journal entry create request
pub fn convert_to_data_entry_request(
    domain_request: &CreateJournalEntryRequest,
    recorded_at: DateTime<Utc>,
) -> ibd_care_data::models::journal::CreateJournalEntryRequest {
    ibd_care_data::models::journal::CreateJournalEntryRequest {
        user_id: domain_request.user_id.clone(),
        entry_date: domain_request.entry_date,
        blood_present: domain_request.blood_present,
        mucus_present: domain_request.mucus_present,
        pain_severity: domain_request.pain_severity,
        urgency_level: domain_request.urgency_level,
        bowel_frequency: domain_request.bowel_frequency,
        bristol_scale: domain_request.bristol_scale,
        stress_level: domain_request.stress_level,
        fatigue_level: domain_request.fatigue_level,
        sleep_quality: domain_request.sleep_quality,
        water_intake_ml: domain_request.water_intake_ml,
        meals_logged: domain_request.meals_logged,
        medication_taken: domain_request.medication_taken,
        notes: domain_request.notes.clone(),
        recorded_at,
    }
}

/// Convert from data model to domain entity for a diagnosis
pub fn convert_to_domain_diagnosis(
    data_diagnosis: ibd_care_data::models::journal::UserDiagnosis,
) -> UserDiagnosis {
    UserDiagnosis {
        user_id: data_diagnosis.user_id,
        disease_type: data_diagnosis.disease_type,
        severity: data_diagnosis.severity,
        location: data_diagnosis.location,
        behavior: data_diagnosis.behavior,
        diagnosis_date: data_diagnosis.diagnosis_date,
    }
}

/// Convert from domain entity to data model for a diagnosis
pub fn convert_to_data_diagnosis(
    domain_diagnosis: &UserDiagnosis,
) -> ibd_care_data::models::journal::UserDiagnosis {
    ibd_care_data::models::journal::UserDiagnosis {
        user_id: domain_diagnosis.user_id.clone(),
        disease_type: domain_diagnosis.disease_type.clone(),
        severity: domain_diagnosis.severity.clone(),
        location: domain_diagnosis.location.clone(),
        behavior: domain_diagnosis.behavior.clone(),
        diagnosis_date: domain_diagnosis.diagnosis_date,
    }
}

/// Convert from data model to domain entity for an intake record
pub fn convert_to_domain_intake(
    data_record: ibd_care_data::models::medication::MedicationIntakeRecord,
) -> MedicationIntakeRecord {
    MedicationIntakeRecord {
        id: data_record.id,
        user_id: data_record.user_id,
        medication_name: data_record.medication_name,
        taken_at: data_record.taken_at,
        dosage: data_record.dosage,
    }
}

/// Convert from domain request to data model for an intake create request
pub fn convert_to_data_intake_request(
    domain_request: &CreateIntakeRequest,
    taken_at: DateTime<Utc>,
) -> ibd_care_data::models::medication::CreateIntakeRequest {
    ibd_care_data::models::medication::CreateIntakeRequest {
        user_id: domain_request.user_id.clone(),
        medication_name: domain_request.medication_name.clone(),
        taken_at,
        dosage: domain_request.dosage.clone(),
    }
}

/// Convert from data model to domain entity for a medication schedule.
/// Returns `None` when the stored cadence tag is unrecognized.
pub fn convert_to_domain_schedule(
    data_schedule: ibd_care_data::models::medication::MedicationSchedule,
) -> Option<MedicationSchedule> {
    let frequency =
        MedicationFrequency::from_tag(&data_schedule.frequency, data_schedule.interval_days)?;

    Some(MedicationSchedule {
        user_id: data_schedule.user_id,
        medication_name: data_schedule.medication_name,
        frequency,
    })
}

/// Convert from domain entity to data model for a medication schedule
pub fn convert_to_data_schedule(
    domain_schedule: &MedicationSchedule,
) -> ibd_care_data::models::medication::MedicationSchedule {
    let interval_days = match domain_schedule.frequency {
        MedicationFrequency::Custom(days) => Some(days),
        _ => None,
    };

    ibd_care_data::models::medication::MedicationSchedule {
        user_id: domain_schedule.user_id.clone(),
        medication_name: domain_schedule.medication_name.clone(),
        frequency: domain_schedule.frequency.as_tag().to_string(),
        interval_days,
    }
}
