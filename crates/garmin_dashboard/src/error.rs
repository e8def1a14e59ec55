//! Custom error types for the dashboard pipeline.

use thiserror::Error;

/// Pipeline errors.
///
/// Malformed individual records are deliberately not represented here: they
/// are recovered locally by skipping the record and surfaced as an aggregate
/// count on the pipeline result. Only failures that invalidate a whole run
/// become errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("provider error: {0}")]
    Provider(#[from] garmin_client::GarminError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("assembly error: {0}")]
    Assembly(String),
}

/// Result type alias for pipeline operations.
pub type DashboardResult<T> = Result<T, DashboardError>;
