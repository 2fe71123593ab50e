use std::collections::BTreeMap;
use chrono::NaiveDate;

use crate::entities::activity::DiseaseActivity;
use crate::entities::journal::{JournalEntry, UserDiagnosis};

// Symptom weights for the per-entry severity score. The score is a
// monotonic weighted sum over the declared symptom fields only; no other
// entry field may influence it. Blood carries enough weight on its own to
// clear the mild/moderate cutoff, which is what lets it dominate entries
// with higher pain or urgency but no blood.
const WEIGHT_PAIN: f64 = 1.0;
const WEIGHT_URGENCY: f64 = 0.8;
const WEIGHT_BOWEL_FREQUENCY: f64 = 0.6;
const WEIGHT_FATIGUE: f64 = 0.4;
const WEIGHT_STRESS: f64 = 0.3;
const WEIGHT_SLEEP_DEFICIT: f64 = 0.3;
const SCORE_MUCUS: f64 = 4.0;
const SCORE_BLOOD: f64 = 12.0;

// Cutoffs applied to the recency-weighted mean score.
const CUTOFF_MILD: f64 = 4.0;
const CUTOFF_MODERATE: f64 = 12.0;
const CUTOFF_SEVERE: f64 = 24.0;

/// Assess disease activity from a window of journal entries.
///
/// The result is deterministic: identical symptom vectors always produce
/// identical output, and no non-symptom field (age, gender, user ID) is
/// read at all. Entries are de-duplicated per calendar day (the latest
/// recorded entry for a day wins) and aggregated with linearly increasing
/// weight toward the most recent day, so a window that worsens toward the
/// present assesses at or above its mirrored improving counterpart.
///
/// With no entries the diagnosis severity label is mapped onto the scale
/// when available. Without a diagnosis either, `fallback_to_healthy`
/// selects the convention: `true` assumes remission, `false` declines to
/// assume health and returns mild. This function never fails.
pub fn assess_disease_activity(
    entries: &[JournalEntry],
    diagnosis: Option<&UserDiagnosis>,
    fallback_to_healthy: bool,
) -> DiseaseActivity {
    let daily = deduplicate_by_day(entries);

    if daily.is_empty() {
        return fallback_activity(diagnosis, fallback_to_healthy);
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    // BTreeMap iteration is ordered by date, oldest first.
    for (position, entry) in daily.values().enumerate() {
        let weight = (position + 1) as f64;
        weighted_sum += weight * entry_severity_score(entry);
        weight_total += weight;
    }

    classify_score(weighted_sum / weight_total)
}

/// Weighted severity score for a single entry, computed from symptom
/// fields only. Numeric inputs are clamped to the documented 0-10 domain.
pub fn entry_severity_score(entry: &JournalEntry) -> f64 {
    let pain = clamp_scale(entry.pain_severity);
    let urgency = clamp_scale(entry.urgency_level);
    let bowel = clamp_scale(entry.bowel_frequency);
    let fatigue = clamp_scale(entry.fatigue_level);
    let stress = clamp_scale(entry.stress_level);
    let sleep_deficit = 10.0 - clamp_scale(entry.sleep_quality);

    let mut score = pain * WEIGHT_PAIN
        + urgency * WEIGHT_URGENCY
        + bowel * WEIGHT_BOWEL_FREQUENCY
        + fatigue * WEIGHT_FATIGUE
        + stress * WEIGHT_STRESS
        + sleep_deficit * WEIGHT_SLEEP_DEFICIT;

    if entry.mucus_present {
        score += SCORE_MUCUS;
    }
    if entry.blood_present {
        score += SCORE_BLOOD;
    }

    score
}

fn classify_score(score: f64) -> DiseaseActivity {
    if score < CUTOFF_MILD {
        DiseaseActivity::Remission
    } else if score < CUTOFF_MODERATE {
        DiseaseActivity::Mild
    } else if score < CUTOFF_SEVERE {
        DiseaseActivity::Moderate
    } else {
        DiseaseActivity::Severe
    }
}

fn fallback_activity(diagnosis: Option<&UserDiagnosis>, fallback_to_healthy: bool) -> DiseaseActivity {
    if let Some(diagnosis) = diagnosis {
        if let Some(activity) = DiseaseActivity::from_severity_label(&diagnosis.severity) {
            return activity;
        }
    }

    if fallback_to_healthy {
        DiseaseActivity::Remission
    } else {
        // Asked not to assume health: report at least mild activity when
        // there is no data to say otherwise.
        DiseaseActivity::Mild
    }
}

/// Collapse duplicate entries for the same calendar day, keeping the one
/// recorded last so a corrected entry supersedes the original.
fn deduplicate_by_day(entries: &[JournalEntry]) -> BTreeMap<NaiveDate, &JournalEntry> {
    let mut daily: BTreeMap<NaiveDate, &JournalEntry> = BTreeMap::new();

    for entry in entries {
        daily
            .entry(entry.entry_date)
            .and_modify(|existing| {
                if entry.recorded_at >= existing.recorded_at {
                    *existing = entry;
                }
            })
            .or_insert(entry);
    }

    daily
}

fn clamp_scale(value: u8) -> f64 {
    value.min(10) as f64
}
