//! Aggregation pipeline turning raw Garmin activity records into the derived
//! views behind a static dashboard: summary statistics, monthly and weekly
//! trend buckets, and a capped list of recent activities.
//!
//! The pipeline is a pure function of its input batch: normalize → filter →
//! {summarize, bucket, select} → assemble. No stage mutates shared state and
//! every run produces one fresh, immutable snapshot.

pub mod config;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod pipeline;
pub mod recent;
pub mod storage;
pub mod summary;
pub mod trends;
pub mod types;

pub use config::PipelineConfig;
pub use error::{DashboardError, DashboardResult};
pub use pipeline::{PipelineRun, build_snapshot};
pub use trends::Granularity;
pub use types::{
    CanonicalActivity, DashboardSnapshot, MonthlyTrend, RecentActivity, SummaryStats, TypeSummary,
    TypeTrend, WeeklyTrend,
};
