//! Conversion of raw provider records into canonical activities.
//!
//! A record that cannot be normalized — unparsable timestamp, missing id, or
//! an activity type outside the configured allow-list — is skipped rather
//! than failing the batch. Skips are counted and logged; they never abort a
//! run.

use crate::config::PipelineConfig;
use crate::types::CanonicalActivity;
use chrono::NaiveDateTime;
use metrics::counter;
use serde_json::Value;

/// Parse a provider timestamp.
///
/// Accepts:
/// - `YYYY-MM-DD HH:MM:SS` (Garmin's local/GMT listing format)
/// - `YYYY-MM-DDTHH:MM:SS` (naive ISO datetime)
/// - RFC3339 (`Z`-suffixed or offset; reduced to its UTC wall-clock time)
pub fn parse_start_time(s: &str) -> Option<NaiveDateTime> {
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt);
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    None
}

fn type_key(raw: &Value) -> Option<String> {
    raw.get("activityType")?
        .get("typeKey")?
        .as_str()
        .map(|s| s.to_ascii_lowercase())
}

/// Default display name for an unnamed activity, e.g. "Lap_Swimming Activity".
fn default_name(kind: &str) -> String {
    let titled: Vec<String> = kind
        .split('_')
        .map(|seg| {
            let mut chars = seg.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    format!("{} Activity", titled.join("_"))
}

fn num_or_zero(raw: &Value, key: &str) -> f64 {
    raw.get(key).and_then(Value::as_f64).unwrap_or(0.0).max(0.0)
}

fn opt_num(raw: &Value, key: &str) -> Option<f64> {
    raw.get(key).and_then(Value::as_f64)
}

/// Normalize a single raw record, or `None` when the record has no place in
/// any derived view.
pub fn normalize_activity(raw: &Value, config: &PipelineConfig) -> Option<CanonicalActivity> {
    let id = garmin_client::activity_id_str(raw)?;

    let start_time = raw
        .get("startTimeLocal")
        .and_then(Value::as_str)
        .and_then(parse_start_time)
        .or_else(|| {
            raw.get("startTimeGMT")
                .and_then(Value::as_str)
                .and_then(parse_start_time)
        })?;

    let kind = type_key(raw)?;
    if !config.is_allowed(&kind) {
        return None;
    }

    let name = raw
        .get("activityName")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| default_name(&kind));

    Some(CanonicalActivity {
        id,
        start_time,
        kind,
        name,
        distance_m: num_or_zero(raw, "distance"),
        duration_s: num_or_zero(raw, "duration"),
        calories: opt_num(raw, "calories"),
        avg_hr: opt_num(raw, "averageHR"),
        max_hr: opt_num(raw, "maxHR"),
        avg_speed: opt_num(raw, "averageSpeed"),
        max_speed: opt_num(raw, "maxSpeed"),
        elevation_gain: opt_num(raw, "elevationGain"),
        start_lat: opt_num(raw, "startLatitude"),
        start_lon: opt_num(raw, "startLongitude"),
    })
}

/// Normalize a batch, returning the canonical records and the skip count.
pub fn normalize_all(raws: &[Value], config: &PipelineConfig) -> (Vec<CanonicalActivity>, usize) {
    let mut out = Vec::with_capacity(raws.len());
    let mut skipped = 0usize;
    for raw in raws {
        match normalize_activity(raw, config) {
            Some(activity) => out.push(activity),
            None => {
                skipped += 1;
                counter!("dashboard_skipped_records_total").increment(1);
                tracing::warn!(
                    activity_id = ?garmin_client::activity_id_str(raw),
                    "skipping activity record"
                );
            }
        }
    }
    (out, skipped)
}
