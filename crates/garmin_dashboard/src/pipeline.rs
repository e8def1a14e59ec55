//! End-to-end assembly of a dashboard snapshot from raw provider records.

use crate::config::PipelineConfig;
use crate::error::DashboardResult;
use crate::filter::filter_allowed;
use crate::normalize::normalize_all;
use crate::recent::recent_activities;
use crate::summary::summarize;
use crate::trends::{monthly_trends, weekly_trends};
use crate::types::DashboardSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Result of one pipeline run: the snapshot plus the number of raw records
/// that had to be skipped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineRun {
    pub snapshot: DashboardSnapshot,
    pub skipped: usize,
}

/// Derive one immutable [`DashboardSnapshot`] from a freshly loaded batch of
/// raw activity records.
///
/// The run either completes with a full snapshot or fails outright; partial
/// snapshots are never produced. An empty batch is not an error — it yields
/// a snapshot with zero totals and empty sequences.
pub fn build_snapshot(
    raw: &[Value],
    config: &PipelineConfig,
    generated_at: DateTime<Utc>,
) -> DashboardResult<PipelineRun> {
    let (canonical, skipped) = normalize_all(raw, config);
    if skipped > 0 {
        tracing::warn!(skipped, total = raw.len(), "records skipped during normalization");
    }

    let filtered = filter_allowed(canonical, config);
    let summary = summarize(&filtered);
    let monthly = monthly_trends(&filtered);
    let weekly = weekly_trends(&filtered, config.weekly_window)?;
    let recent = recent_activities(&filtered, config.recent_limit);

    tracing::debug!(
        activities = filtered.len(),
        months = monthly.len(),
        weeks = weekly.len(),
        "assembled dashboard snapshot"
    );

    Ok(PipelineRun {
        snapshot: DashboardSnapshot {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            summary,
            monthly_trends: monthly,
            weekly_trends: weekly,
            recent_activities: recent,
        },
        skipped,
    })
}
