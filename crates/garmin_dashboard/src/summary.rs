//! Whole-history and per-type summary statistics.

use crate::types::{CanonicalActivity, SummaryStats, TypeSummary};
use std::collections::BTreeMap;

#[derive(Default)]
struct TypeAccum {
    count: usize,
    distance_km: f64,
    duration_hours: f64,
    calories: f64,
}

/// Roll the filtered activities up into [`SummaryStats`].
///
/// An empty input yields all-zero totals and an empty per-type map. Means
/// are zero-guarded so no division by zero can leak a NaN into the output.
pub fn summarize(activities: &[CanonicalActivity]) -> SummaryStats {
    let mut stats = SummaryStats::default();
    let mut by_type: BTreeMap<String, TypeAccum> = BTreeMap::new();

    for activity in activities {
        let distance_km = activity.distance_m / 1000.0;
        let duration_hours = activity.duration_s / 3600.0;
        let calories = activity.calories.unwrap_or(0.0);

        stats.total_activities += 1;
        stats.total_distance_km += distance_km;
        stats.total_duration_hours += duration_hours;
        stats.total_calories += calories;

        let accum = by_type.entry(activity.kind.clone()).or_default();
        accum.count += 1;
        accum.distance_km += distance_km;
        accum.duration_hours += duration_hours;
        accum.calories += calories;
    }

    stats.by_type = by_type
        .into_iter()
        .map(|(kind, accum)| {
            let count = accum.count;
            let mean = |total: f64| if count > 0 { total / count as f64 } else { 0.0 };
            (
                kind,
                TypeSummary {
                    count,
                    total_distance_km: accum.distance_km,
                    avg_distance_km: mean(accum.distance_km),
                    total_duration_hours: accum.duration_hours,
                    avg_duration_hours: mean(accum.duration_hours),
                    total_calories: accum.calories,
                },
            )
        })
        .collect();

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn activity(kind: &str, distance_m: f64, duration_s: f64, calories: Option<f64>) -> CanonicalActivity {
        CanonicalActivity {
            id: "x".into(),
            start_time: NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap(),
            kind: kind.into(),
            name: "test".into(),
            distance_m,
            duration_s,
            calories,
            avg_hr: None,
            max_hr: None,
            avg_speed: None,
            max_speed: None,
            elevation_gain: None,
            start_lat: None,
            start_lon: None,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let stats = summarize(&[]);
        assert_eq!(stats.total_activities, 0);
        assert_eq!(stats.total_distance_km, 0.0);
        assert!(stats.by_type.is_empty());
    }

    #[test]
    fn totals_and_means_per_type() {
        let input = vec![
            activity("running", 5000.0, 1800.0, Some(320.0)),
            activity("running", 10000.0, 3600.0, Some(640.0)),
            activity("cycling", 40000.0, 5400.0, None),
        ];
        let stats = summarize(&input);
        assert_eq!(stats.total_activities, 3);
        assert_eq!(stats.total_distance_km, 55.0);
        assert_eq!(stats.total_calories, 960.0);

        let running = &stats.by_type["running"];
        assert_eq!(running.count, 2);
        assert_eq!(running.total_distance_km, 15.0);
        assert_eq!(running.avg_distance_km, 7.5);
        assert_eq!(running.total_duration_hours, 1.5);
        assert_eq!(running.avg_duration_hours, 0.75);

        let cycling = &stats.by_type["cycling"];
        assert_eq!(cycling.count, 1);
        assert_eq!(cycling.total_calories, 0.0);
    }

    #[test]
    fn missing_calories_count_as_zero_in_sums() {
        let input = vec![
            activity("running", 1000.0, 600.0, Some(100.0)),
            activity("running", 1000.0, 600.0, None),
        ];
        let stats = summarize(&input);
        assert_eq!(stats.total_calories, 100.0);
        assert_eq!(stats.by_type["running"].total_calories, 100.0);
    }

    #[test]
    fn per_type_totals_sum_to_global_total() {
        let input = vec![
            activity("running", 5000.0, 1800.0, None),
            activity("cycling", 20000.0, 3600.0, None),
            activity("lap_swimming", 1500.0, 1900.0, None),
        ];
        let stats = summarize(&input);
        let by_type_sum: f64 = stats.by_type.values().map(|t| t.total_distance_km).sum();
        assert!((by_type_sum - stats.total_distance_km).abs() < 1e-9);
    }
}
