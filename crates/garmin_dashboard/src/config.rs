use crate::error::{DashboardError, DashboardResult};
use std::collections::BTreeSet;

/// Activity types tracked when no explicit configuration is given.
pub const DEFAULT_ALLOWED_TYPES: [&str; 4] =
    ["running", "cycling", "lap_swimming", "open_water_swimming"];

const DEFAULT_RECENT_LIMIT: usize = 10;
const DEFAULT_WEEKLY_WINDOW: usize = 12;

/// Configuration for one pipeline run.
///
/// The allow-list of activity types is an explicit parameter here rather
/// than a constant: changing the tracked sports is configuration, not a
/// rebuild.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Lower-cased activity type keys eligible for any derived view.
    pub allowed_types: BTreeSet<String>,
    /// Maximum number of entries in the recent-activities view.
    pub recent_limit: usize,
    /// Number of most recent weekly buckets kept in the weekly trend view.
    pub weekly_window: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_ALLOWED_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            weekly_window: DEFAULT_WEEKLY_WINDOW,
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> DashboardResult<Self> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never mutate the process environment.
    pub fn from_env_with<F>(mut get: F) -> DashboardResult<Self>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = get("GARMIN_DASHBOARD_TYPES") {
            let types: BTreeSet<String> = raw
                .split(',')
                .map(|t| t.trim().to_ascii_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            if types.is_empty() {
                return Err(DashboardError::Config(
                    "GARMIN_DASHBOARD_TYPES contains no activity types".into(),
                ));
            }
            config.allowed_types = types;
        }

        if let Some(raw) = get("GARMIN_DASHBOARD_RECENT_LIMIT") {
            config.recent_limit = raw.parse().map_err(|_| {
                DashboardError::Config(format!("invalid GARMIN_DASHBOARD_RECENT_LIMIT: {raw}"))
            })?;
        }

        if let Some(raw) = get("GARMIN_DASHBOARD_WEEKLY_WINDOW") {
            config.weekly_window = raw.parse().map_err(|_| {
                DashboardError::Config(format!("invalid GARMIN_DASHBOARD_WEEKLY_WINDOW: {raw}"))
            })?;
        }

        Ok(config)
    }

    pub fn is_allowed(&self, kind: &str) -> bool {
        self.allowed_types.contains(kind)
    }
}
