//! Most-recent-activities display view.

use crate::types::{CanonicalActivity, RecentActivity};

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Select at most `limit` activities, most recent first. The sort is stable,
/// so activities sharing a timestamp keep their input order.
pub fn recent_activities(activities: &[CanonicalActivity], limit: usize) -> Vec<RecentActivity> {
    let mut sorted: Vec<&CanonicalActivity> = activities.iter().collect();
    sorted.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    sorted
        .into_iter()
        .take(limit)
        .map(|a| RecentActivity {
            date: a.start_time.format("%Y-%m-%d").to_string(),
            name: a.name.clone(),
            kind: a.kind.clone(),
            distance_km: round2(a.distance_m / 1000.0),
            duration_minutes: round1(a.duration_s / 60.0),
            calories: a.calories.map(|c| c as i64),
        })
        .collect()
}
