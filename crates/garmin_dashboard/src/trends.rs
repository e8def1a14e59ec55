//! Calendar-month and ISO-week trend buckets.
//!
//! Buckets are sparse: a calendar interval with no activity simply does not
//! appear. Ordering is ascending by bucket start, which the `BTreeMap` keyed
//! by `(year, month-or-week)` gives by construction.

use crate::error::{DashboardError, DashboardResult};
use crate::types::{CanonicalActivity, MonthlyTrend, TypeTrend, WeeklyTrend};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Bucketing granularity for trend computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Granularity {
    Month,
    Week,
}

#[derive(Default)]
struct BucketAccum {
    activities: usize,
    distance_km: f64,
    /// Per type: (count, distance km).
    by_type: BTreeMap<String, (usize, f64)>,
}

fn fold(
    activities: &[CanonicalActivity],
    granularity: Granularity,
) -> BTreeMap<(i32, u32), BucketAccum> {
    let mut buckets: BTreeMap<(i32, u32), BucketAccum> = BTreeMap::new();
    for activity in activities {
        let key = match granularity {
            Granularity::Month => (activity.start_time.year(), activity.start_time.month()),
            Granularity::Week => {
                let iso = activity.start_time.date().iso_week();
                (iso.year(), iso.week())
            }
        };
        let distance_km = activity.distance_m / 1000.0;
        let bucket = buckets.entry(key).or_default();
        bucket.activities += 1;
        bucket.distance_km += distance_km;
        let per_type = bucket.by_type.entry(activity.kind.clone()).or_default();
        per_type.0 += 1;
        per_type.1 += distance_km;
    }
    buckets
}

/// Group activities into calendar-month buckets, ascending.
pub fn monthly_trends(activities: &[CanonicalActivity]) -> Vec<MonthlyTrend> {
    fold(activities, Granularity::Month)
        .into_iter()
        .map(|((year, month), accum)| MonthlyTrend {
            month: format!("{year:04}-{month:02}"),
            total_activities: accum.activities,
            total_distance_km: accum.distance_km,
            by_type: accum
                .by_type
                .into_iter()
                .map(|(kind, (count, distance_km))| (kind, TypeTrend { count, distance_km }))
                .collect(),
        })
        .collect()
}

/// Group activities into ISO-week buckets, ascending, keeping only the most
/// recent `window` buckets.
pub fn weekly_trends(
    activities: &[CanonicalActivity],
    window: usize,
) -> DashboardResult<Vec<WeeklyTrend>> {
    let buckets = fold(activities, Granularity::Week);
    let mut out = Vec::with_capacity(buckets.len());
    for ((year, week), accum) in buckets {
        let start = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(|| {
            DashboardError::Assembly(format!("week {year}-W{week:02} has no start date"))
        })?;
        out.push(WeeklyTrend {
            week: format!("{year:04}-W{week:02}"),
            week_start: format!("{}T00:00:00", start.format("%Y-%m-%d")),
            total_distance_km: accum.distance_km,
            activities: accum.activities,
            by_type: accum
                .by_type
                .into_iter()
                .map(|(kind, (_count, distance_km))| (kind, distance_km))
                .collect(),
        });
    }
    if out.len() > window {
        out.drain(..out.len() - window);
    }
    Ok(out)
}
