use std::collections::HashSet;
use chrono::{Datelike, Duration, NaiveDate, Timelike};

use crate::entities::medication::{
    AdherenceResult, GapAnalysis, MedicationFrequency, MedicationIntakeRecord, MonthlyAdherence,
    QualityMetrics,
};

/// Calculate a medication-adherence report for one medication over an
/// inclusive date range.
///
/// This is a pure calendar computation: no I/O, no shared state, and
/// identical inputs always produce identical output. Empty input is not an
/// error; it normalizes to zero doses taken against the schedule's normal
/// expectation.
pub fn calculate_adherence(
    records: &[MedicationIntakeRecord],
    frequency: MedicationFrequency,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AdherenceResult {
    let mut in_range: Vec<&MedicationIntakeRecord> = records
        .iter()
        .filter(|record| {
            let day = record.taken_at.date_naive();
            day >= start_date && day <= end_date
        })
        .collect();
    in_range.sort_by_key(|record| record.taken_at);

    let expected_doses = expected_doses(frequency, start_date, end_date);
    let actual_doses = actual_doses(&in_range, frequency, start_date);
    let adherence_percentage = adherence_percentage(actual_doses, expected_doses);

    let monthly_averages = month_spans(start_date, end_date)
        .into_iter()
        .map(|(span_start, span_end)| {
            let month_records: Vec<&MedicationIntakeRecord> = in_range
                .iter()
                .filter(|record| {
                    let day = record.taken_at.date_naive();
                    day >= span_start && day <= span_end
                })
                .copied()
                .collect();

            let expected = self::expected_doses(frequency, span_start, span_end);
            let actual = self::actual_doses(&month_records, frequency, span_start);

            MonthlyAdherence {
                year: span_start.year(),
                month: span_start.month(),
                actual_doses: actual,
                expected_doses: expected,
                adherence_percentage: self::adherence_percentage(actual, expected),
            }
        })
        .collect();

    AdherenceResult {
        adherence_percentage,
        actual_doses,
        expected_doses,
        monthly_averages,
        quality_metrics: QualityMetrics {
            timing_consistency: timing_consistency(&in_range),
            gap_analysis: gap_analysis(&in_range, frequency),
        },
    }
}

/// Expected dose count for a frequency over an inclusive date range.
///
/// Daily expects one dose per calendar day; interval-based cadences expect
/// one dose per interval, floored, with a minimum of one for any non-empty
/// range so that every calendar month a report touches carries a non-zero
/// expectation. As-needed medication has no expectation at all.
pub fn expected_doses(frequency: MedicationFrequency, start_date: NaiveDate, end_date: NaiveDate) -> u32 {
    let days = (end_date - start_date).num_days() + 1;
    if days <= 0 {
        return 0;
    }

    match frequency.interval_days() {
        None => 0,
        Some(interval) => (days / interval as i64).max(1) as u32,
    }
}

/// Count doses taken, capped at one per dosing period so duplicate
/// same-period records never inflate adherence. As-needed medication has
/// no periods; its raw count is reported.
fn actual_doses(
    records: &[&MedicationIntakeRecord],
    frequency: MedicationFrequency,
    start_date: NaiveDate,
) -> u32 {
    match frequency.interval_days() {
        None => records.len() as u32,
        Some(interval) => {
            let mut dosed_periods: HashSet<i64> = HashSet::new();
            for record in records {
                let offset = (record.taken_at.date_naive() - start_date).num_days();
                dosed_periods.insert(offset / interval as i64);
            }
            dosed_periods.len() as u32
        }
    }
}

fn adherence_percentage(actual: u32, expected: u32) -> f64 {
    if expected == 0 {
        return 0.0;
    }
    (100.0 * actual as f64 / expected as f64).min(100.0)
}

/// Partition an inclusive date range into calendar-month sub-ranges,
/// clamped to the range bounds
fn month_spans(start_date: NaiveDate, end_date: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut spans = Vec::new();
    let mut cursor = start_date;

    while cursor <= end_date {
        let span_end = last_day_of_month(cursor).min(end_date);
        spans.push((cursor, span_end));
        cursor = span_end + Duration::days(1);
    }

    spans
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first_of_next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };

    // The first of a month always exists.
    first_of_next.unwrap() - Duration::days(1)
}

/// Score how stable the time of day is across doses, 0-100.
///
/// Derived from the standard deviation of minutes-from-midnight: identical
/// clock times score 100 and the score decays linearly, reaching 0 at a
/// spread of 12 hours. A single dose has nothing inconsistent about it and
/// scores 100; an empty history scores 0.
fn timing_consistency(records: &[&MedicationIntakeRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    if records.len() == 1 {
        return 100.0;
    }

    let minutes: Vec<f64> = records
        .iter()
        .map(|record| {
            let time = record.taken_at.time();
            (time.hour() * 60 + time.minute()) as f64
        })
        .collect();

    let mean = minutes.iter().sum::<f64>() / minutes.len() as f64;
    let variance = minutes
        .iter()
        .map(|minute| (minute - mean).powi(2))
        .sum::<f64>()
        / minutes.len() as f64;
    let spread = variance.sqrt();

    (100.0 * (1.0 - spread / 720.0)).clamp(0.0, 100.0)
}

/// Count inter-dose intervals longer than the schedule's expected interval
/// and average their excess length in days
fn gap_analysis(records: &[&MedicationIntakeRecord], frequency: MedicationFrequency) -> GapAnalysis {
    let expected_interval = match frequency.interval_days() {
        Some(interval) => interval as i64,
        // As-needed medication has no schedule to fall behind.
        None => {
            return GapAnalysis {
                total_gaps: 0,
                average_gap_days: 0.0,
            }
        }
    };

    let mut total_gaps = 0u32;
    let mut excess_days = 0i64;

    for pair in records.windows(2) {
        let interval = (pair[1].taken_at.date_naive() - pair[0].taken_at.date_naive()).num_days();
        if interval > expected_interval {
            total_gaps += 1;
            excess_days += interval - expected_interval;
        }
    }

    let average_gap_days = if total_gaps > 0 {
        excess_days as f64 / total_gaps as f64
    } else {
        0.0
    };

    GapAnalysis {
        total_gaps,
        average_gap_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record_at(date: NaiveDate, hour: u32, minute: u32) -> MedicationIntakeRecord {
        MedicationIntakeRecord {
            id: format!("dose-{}-{}", date, hour),
            user_id: "user-1".to_string(),
            medication_name: "Mesalamine".to_string(),
            taken_at: Utc.from_utc_datetime(&date.and_hms_opt(hour, minute, 0).unwrap()),
            dosage: Some("50mg".to_string()),
        }
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn test_full_daily_adherence_over_thirty_days() {
        let records: Vec<MedicationIntakeRecord> =
            (0..30).map(|offset| record_at(day(offset), 8, 0)).collect();

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(29));

        assert_eq!(result.expected_doses, 30);
        assert_eq!(result.actual_doses, records.len() as u32);
        assert_eq!(result.adherence_percentage, 100.0);
    }

    #[test]
    fn test_partial_daily_adherence() {
        let records: Vec<MedicationIntakeRecord> =
            (0..24).map(|offset| record_at(day(offset), 8, 0)).collect();

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(29));

        assert_eq!(result.actual_doses, 24);
        assert_eq!(result.expected_doses, 30);
        assert!((result.adherence_percentage - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_weekly_adherence_over_four_weeks() {
        let records: Vec<MedicationIntakeRecord> =
            (0..4).map(|week| record_at(day(week * 7), 9, 0)).collect();

        let result = calculate_adherence(&records, MedicationFrequency::Weekly, day(0), day(27));

        assert_eq!(result.expected_doses, 4);
        assert_eq!(result.actual_doses, 4);
        assert_eq!(result.adherence_percentage, 100.0);
    }

    #[test]
    fn test_biweekly_adherence_over_four_weeks() {
        let records = vec![record_at(day(0), 9, 0), record_at(day(14), 9, 0)];

        let result = calculate_adherence(&records, MedicationFrequency::BiWeekly, day(0), day(27));

        assert_eq!(result.expected_doses, 2);
        assert_eq!(result.actual_doses, 2);
        assert_eq!(result.adherence_percentage, 100.0);
    }

    #[test]
    fn test_custom_interval_expected_doses() {
        let result =
            calculate_adherence(&[], MedicationFrequency::Custom(3), day(0), day(29));

        assert_eq!(result.expected_doses, 10);
    }

    #[test]
    fn test_as_needed_has_no_expectation() {
        let records = vec![record_at(day(3), 9, 0), record_at(day(10), 21, 0)];

        let result = calculate_adherence(&records, MedicationFrequency::AsNeeded, day(0), day(29));

        assert_eq!(result.expected_doses, 0);
        assert_eq!(result.adherence_percentage, 0.0);
        assert_eq!(result.actual_doses, 2);
    }

    #[test]
    fn test_empty_records_normalize_to_zero_adherence() {
        let result = calculate_adherence(&[], MedicationFrequency::Daily, day(0), day(29));

        assert_eq!(result.actual_doses, 0);
        assert_eq!(result.adherence_percentage, 0.0);
        assert!(result.expected_doses > 0);
    }

    #[test]
    fn test_duplicate_same_day_doses_do_not_inflate_adherence() {
        let records = vec![
            record_at(day(0), 8, 0),
            record_at(day(0), 20, 0),
            record_at(day(1), 8, 0),
        ];

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(1));

        assert_eq!(result.actual_doses, 2);
        assert_eq!(result.adherence_percentage, 100.0);
    }

    #[test]
    fn test_adherence_percentage_is_clamped_to_one_hundred() {
        // 30 days of weekly dosing touches 5 periods but only 4 are expected.
        let records: Vec<MedicationIntakeRecord> =
            (0..5).map(|week| record_at(day(week * 7), 9, 0)).collect();

        let result = calculate_adherence(&records, MedicationFrequency::Weekly, day(0), day(29));

        assert_eq!(result.expected_doses, 4);
        assert_eq!(result.adherence_percentage, 100.0);
    }

    #[test]
    fn test_records_outside_range_are_ignored() {
        let records = vec![
            record_at(day(-5), 8, 0),
            record_at(day(0), 8, 0),
            record_at(day(40), 8, 0),
        ];

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(29));

        assert_eq!(result.actual_doses, 1);
    }

    #[test]
    fn test_three_month_range_partitions_into_three_months() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();

        let result = calculate_adherence(&[], MedicationFrequency::Daily, start, end);

        assert_eq!(result.monthly_averages.len(), 3);
        let months: Vec<(i32, u32)> = result
            .monthly_averages
            .iter()
            .map(|monthly| (monthly.year, monthly.month))
            .collect();
        assert_eq!(months, vec![(2024, 1), (2024, 2), (2024, 3)]);

        for monthly in &result.monthly_averages {
            assert!(monthly.expected_doses > 0);
        }
    }

    #[test]
    fn test_short_month_slice_still_expects_a_weekly_dose() {
        // March only contributes 3 days to the range; a weekly schedule
        // still expects one dose in that slice.
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();

        let result = calculate_adherence(&[], MedicationFrequency::Weekly, start, end);

        assert_eq!(result.monthly_averages.len(), 2);
        assert!(result.monthly_averages.iter().all(|m| m.expected_doses > 0));
    }

    #[test]
    fn test_monthly_breakdown_counts_doses_per_month() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records: Vec<MedicationIntakeRecord> = (0..31)
            .map(|offset| record_at(start + Duration::days(offset), 8, 0))
            .collect();
        let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let result = calculate_adherence(&records, MedicationFrequency::Daily, start, end);

        assert_eq!(result.monthly_averages[0].actual_doses, 31);
        assert_eq!(result.monthly_averages[0].adherence_percentage, 100.0);
        assert_eq!(result.monthly_averages[1].actual_doses, 0);
        assert_eq!(result.monthly_averages[1].adherence_percentage, 0.0);
    }

    #[test]
    fn test_identical_clock_times_score_high_timing_consistency() {
        let records: Vec<MedicationIntakeRecord> =
            (0..14).map(|offset| record_at(day(offset), 8, 30)).collect();

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(13));

        assert!(result.quality_metrics.timing_consistency > 80.0);
    }

    #[test]
    fn test_scattered_clock_times_score_lower_than_stable_ones() {
        let stable: Vec<MedicationIntakeRecord> =
            (0..10).map(|offset| record_at(day(offset), 8, 0)).collect();
        let scattered: Vec<MedicationIntakeRecord> = (0..10)
            .map(|offset| record_at(day(offset), (2 + offset as u32 * 2) % 24, 0))
            .collect();

        let stable_result = calculate_adherence(&stable, MedicationFrequency::Daily, day(0), day(9));
        let scattered_result =
            calculate_adherence(&scattered, MedicationFrequency::Daily, day(0), day(9));

        assert!(
            stable_result.quality_metrics.timing_consistency
                > scattered_result.quality_metrics.timing_consistency
        );
    }

    #[test]
    fn test_four_day_gap_is_reported() {
        let records = vec![
            record_at(day(0), 8, 0),
            record_at(day(4), 8, 0),
            record_at(day(5), 8, 0),
            record_at(day(6), 8, 0),
        ];

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(6));

        assert!(result.quality_metrics.gap_analysis.total_gaps > 0);
        assert!(result.quality_metrics.gap_analysis.average_gap_days > 0.0);
    }

    #[test]
    fn test_gapless_daily_schedule_reports_no_gaps() {
        let records: Vec<MedicationIntakeRecord> =
            (0..7).map(|offset| record_at(day(offset), 8, 0)).collect();

        let result = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(6));

        assert_eq!(result.quality_metrics.gap_analysis.total_gaps, 0);
        assert_eq!(result.quality_metrics.gap_analysis.average_gap_days, 0.0);
    }

    #[test]
    fn test_identical_inputs_yield_identical_reports() {
        let records: Vec<MedicationIntakeRecord> =
            (0..10).map(|offset| record_at(day(offset), 8, 0)).collect();

        let first = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(9));
        let second = calculate_adherence(&records, MedicationFrequency::Daily, day(0), day(9));

        assert_eq!(first, second);
    }
}
