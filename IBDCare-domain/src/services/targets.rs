use crate::entities::activity::DiseaseActivity;
use crate::entities::journal::JournalEntry;
use crate::entities::medication::MedicationIntakeRecord;
use crate::entities::targets::{
    HealthMetricTargets, MedicationAdherenceTarget, PatientProfile, SymptomTargets, TargetBundle,
};

/// Evidence-based medication-adherence thresholds for a disease-activity
/// level. Purely table-driven: the profile and history parameters are
/// accepted for forward extensibility but must not influence the result,
/// so patients with identical activity levels always receive identical
/// targets.
pub fn adherence_target(
    _profile: &PatientProfile,
    activity: DiseaseActivity,
    _medication_history: &[MedicationIntakeRecord],
) -> MedicationAdherenceTarget {
    match activity {
        DiseaseActivity::Remission => MedicationAdherenceTarget {
            target: 90.0,
            warning_threshold: 80.0,
            critical_threshold: 70.0,
        },
        DiseaseActivity::Mild => MedicationAdherenceTarget {
            target: 95.0,
            warning_threshold: 85.0,
            critical_threshold: 75.0,
        },
        DiseaseActivity::Moderate => MedicationAdherenceTarget {
            target: 98.0,
            warning_threshold: 90.0,
            critical_threshold: 80.0,
        },
        DiseaseActivity::Severe => MedicationAdherenceTarget {
            target: 100.0,
            warning_threshold: 95.0,
            critical_threshold: 90.0,
        },
    }
}

/// Symptom ceilings for a disease-activity level. Each escalation level
/// raises every axis by one step from the remission baseline.
pub fn symptom_targets(
    _profile: &PatientProfile,
    activity: DiseaseActivity,
    _symptom_history: &[JournalEntry],
) -> SymptomTargets {
    let step = match activity {
        DiseaseActivity::Remission => 0,
        DiseaseActivity::Mild => 1,
        DiseaseActivity::Moderate => 2,
        DiseaseActivity::Severe => 3,
    };

    SymptomTargets {
        pain: 2 + step,
        stress: 3 + step,
        fatigue: 2 + step,
        bowel_frequency: 1 + step,
        urgency: 2 + step,
    }
}

/// Broader health-metric targets: adherence plus symptom ceilings plus a
/// weight-change target (held at 0.0 kg across all activity levels).
pub fn health_metric_targets(
    profile: &PatientProfile,
    activity: DiseaseActivity,
    medication_history: &[MedicationIntakeRecord],
    symptom_history: &[JournalEntry],
    _health_history: &[JournalEntry],
) -> HealthMetricTargets {
    HealthMetricTargets {
        adherence: adherence_target(profile, activity, medication_history),
        symptoms: symptom_targets(profile, activity, symptom_history),
        weight_change_target: 0.0,
    }
}

/// All targets for a patient at a given disease-activity level
pub fn all_targets(
    profile: &PatientProfile,
    activity: DiseaseActivity,
    medication_history: &[MedicationIntakeRecord],
    symptom_history: &[JournalEntry],
    health_history: &[JournalEntry],
) -> TargetBundle {
    TargetBundle {
        adherence: adherence_target(profile, activity, medication_history),
        symptoms: symptom_targets(profile, activity, symptom_history),
        health_metrics: health_metric_targets(
            profile,
            activity,
            medication_history,
            symptom_history,
            health_history,
        ),
    }
}

/// Citations backing the target tables
pub fn research_sources() -> Vec<&'static str> {
    vec![
        "American College of Gastroenterology (ACG) Clinical Guideline: Management of Crohn's Disease in Adults",
        "Crohn's & Colitis Foundation: IBD Medication Adherence Position Statement",
        "World Health Organization (WHO): Adherence to Long-Term Therapies - Evidence for Action",
        "Academy of Nutrition and Dietetics: Nutrition Care Manual, Inflammatory Bowel Disease",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_age(age: u8) -> PatientProfile {
        PatientProfile {
            user_id: "user-1".to_string(),
            age: Some(age),
            gender: None,
            diagnosis: None,
        }
    }

    #[test]
    fn test_adherence_target_table() {
        let profile = profile_with_age(16);

        let cases = [
            (DiseaseActivity::Remission, 90.0, 80.0, 70.0),
            (DiseaseActivity::Mild, 95.0, 85.0, 75.0),
            (DiseaseActivity::Moderate, 98.0, 90.0, 80.0),
            (DiseaseActivity::Severe, 100.0, 95.0, 90.0),
        ];

        for (activity, target, warning, critical) in cases {
            let result = adherence_target(&profile, activity, &[]);
            assert_eq!(result.target, target, "target for {}", activity);
            assert_eq!(result.warning_threshold, warning, "warning for {}", activity);
            assert_eq!(result.critical_threshold, critical, "critical for {}", activity);
        }
    }

    #[test]
    fn test_symptom_target_table() {
        let profile = profile_with_age(16);

        let remission = symptom_targets(&profile, DiseaseActivity::Remission, &[]);
        assert_eq!(
            remission,
            SymptomTargets { pain: 2, stress: 3, fatigue: 2, bowel_frequency: 1, urgency: 2 }
        );

        let mild = symptom_targets(&profile, DiseaseActivity::Mild, &[]);
        assert_eq!(
            mild,
            SymptomTargets { pain: 3, stress: 4, fatigue: 3, bowel_frequency: 2, urgency: 3 }
        );

        let moderate = symptom_targets(&profile, DiseaseActivity::Moderate, &[]);
        assert_eq!(
            moderate,
            SymptomTargets { pain: 4, stress: 5, fatigue: 4, bowel_frequency: 3, urgency: 4 }
        );

        let severe = symptom_targets(&profile, DiseaseActivity::Severe, &[]);
        assert_eq!(
            severe,
            SymptomTargets { pain: 5, stress: 6, fatigue: 5, bowel_frequency: 4, urgency: 5 }
        );
    }

    #[test]
    fn test_targets_ignore_age_and_gender() {
        let teenager = profile_with_age(16);
        let mut senior = profile_with_age(75);
        senior.gender = Some("female".to_string());

        for activity in [
            DiseaseActivity::Remission,
            DiseaseActivity::Mild,
            DiseaseActivity::Moderate,
            DiseaseActivity::Severe,
        ] {
            assert_eq!(
                adherence_target(&teenager, activity, &[]),
                adherence_target(&senior, activity, &[])
            );
            assert_eq!(
                symptom_targets(&teenager, activity, &[]),
                symptom_targets(&senior, activity, &[])
            );
        }
    }

    #[test]
    fn test_weight_change_target_is_zero_for_all_levels() {
        let profile = profile_with_age(12);

        for activity in [
            DiseaseActivity::Remission,
            DiseaseActivity::Mild,
            DiseaseActivity::Moderate,
            DiseaseActivity::Severe,
        ] {
            let targets = health_metric_targets(&profile, activity, &[], &[], &[]);
            assert_eq!(targets.weight_change_target, 0.0);
        }
    }

    #[test]
    fn test_all_targets_aggregates_consistently() {
        let profile = profile_with_age(14);
        let bundle = all_targets(&profile, DiseaseActivity::Moderate, &[], &[], &[]);

        assert_eq!(
            bundle.adherence,
            adherence_target(&profile, DiseaseActivity::Moderate, &[])
        );
        assert_eq!(bundle.health_metrics.adherence, bundle.adherence);
        assert_eq!(bundle.health_metrics.symptoms, bundle.symptoms);
    }

    #[test]
    fn test_research_sources_name_guideline_bodies() {
        let sources = research_sources();
        let joined = sources.join("; ");

        assert!(joined.contains("Gastroenterology"));
        assert!(joined.contains("Crohn's & Colitis Foundation"));
        assert!(joined.contains("World Health Organization"));
        assert!(joined.contains("Nutrition"));
    }
}
