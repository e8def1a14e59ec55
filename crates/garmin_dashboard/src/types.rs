use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::Serialize;
use std::collections::BTreeMap;

/// An activity after unit normalization and field defaulting, ready for
/// aggregation.
///
/// `distance_m` and `duration_s` default to 0 when the provider omits them;
/// the optional fields keep absence distinguishable from zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalActivity {
    pub id: String,
    pub start_time: NaiveDateTime,
    pub kind: String,
    pub name: String,
    pub distance_m: f64,
    pub duration_s: f64,
    pub calories: Option<f64>,
    pub avg_hr: Option<f64>,
    pub max_hr: Option<f64>,
    pub avg_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub elevation_gain: Option<f64>,
    pub start_lat: Option<f64>,
    pub start_lon: Option<f64>,
}

/// Per-type roll-up inside [`SummaryStats`].
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TypeSummary {
    pub count: usize,
    pub total_distance_km: f64,
    pub avg_distance_km: f64,
    pub total_duration_hours: f64,
    pub avg_duration_hours: f64,
    pub total_calories: f64,
}

/// Whole-history summary statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct SummaryStats {
    pub total_activities: usize,
    pub total_distance_km: f64,
    pub total_duration_hours: f64,
    pub total_calories: f64,
    pub by_type: BTreeMap<String, TypeSummary>,
}

/// Per-type share of a monthly bucket.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct TypeTrend {
    pub count: usize,
    pub distance_km: f64,
}

/// One calendar-month trend bucket.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct MonthlyTrend {
    /// Bucket label, `YYYY-MM`.
    pub month: String,
    pub total_activities: usize,
    pub total_distance_km: f64,
    pub by_type: BTreeMap<String, TypeTrend>,
}

/// One ISO calendar-week trend bucket.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct WeeklyTrend {
    /// Bucket label, `GGGG-Www` (ISO week-numbering year and week).
    pub week: String,
    /// Start of the week (Monday, midnight), ISO 8601.
    pub week_start: String,
    pub total_distance_km: f64,
    pub activities: usize,
    /// Distance per activity type, km.
    pub by_type: BTreeMap<String, f64>,
}

/// One display row in the recent-activities view.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct RecentActivity {
    /// Date only, `YYYY-MM-DD`.
    pub date: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Rounded to 2 decimals.
    pub distance_km: f64,
    /// Rounded to 1 decimal.
    pub duration_minutes: f64,
    /// `null` when the provider reported no calorie figure.
    pub calories: Option<i64>,
}

/// One complete, immutable set of derived dashboard outputs from a single
/// pipeline run. Superseded wholesale by the next run.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct DashboardSnapshot {
    pub generated_at: String,
    pub summary: SummaryStats,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub weekly_trends: Vec<WeeklyTrend>,
    pub recent_activities: Vec<RecentActivity>,
}
