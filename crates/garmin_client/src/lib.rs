//! Minimal `GarminClient` trait and basic reqwest-based implementation.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod observability;
pub mod retry;

#[derive(Debug, Error)]
pub enum GarminError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("api error (status {status}): {body}")]
    Api { status: u16, body: String },
}

impl GarminError {
    pub fn from_status(status: u16, body: String) -> Self {
        GarminError::Api { status, body }
    }

    /// Whether a request that failed with this error is worth retrying.
    /// Transport failures, throttling and server errors are transient;
    /// auth and client errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            GarminError::Http(_) | GarminError::RateLimited(_) => true,
            GarminError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Client for the Garmin Connect API.
///
/// Activity payloads are returned as raw `serde_json::Value` objects: the
/// provider's schema is open-ended and the consuming pipeline reads the
/// fields it needs defensively.
#[async_trait]
pub trait GarminClient: Send + Sync + 'static {
    async fn get_user_profile(&self) -> Result<UserProfile, GarminError>;

    /// Fetch one page of the activity list, newest first.
    async fn get_activities(
        &self,
        start: u32,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, GarminError>;

    /// Fetch the detail payload for a single activity.
    async fn get_activity_details(
        &self,
        activity_id: &str,
    ) -> Result<serde_json::Value, GarminError>;
}

/// Extract an activity id from a raw record, accepting either a string or a
/// numeric `activityId`.
pub fn activity_id_str(raw: &serde_json::Value) -> Option<String> {
    match raw.get("activityId")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Page through the full activity list, newest first, retrying transient
/// failures per `policy`. Stops on the first short page.
pub async fn fetch_all_activities(
    client: &dyn GarminClient,
    page_size: u32,
    policy: &retry::RetryPolicy,
) -> Result<Vec<serde_json::Value>, GarminError> {
    let mut all = Vec::new();
    let mut start = 0u32;
    loop {
        let page = policy
            .retry_async(
                || client.get_activities(start, page_size),
                GarminError::is_retryable,
            )
            .await?;
        let fetched = page.len();
        tracing::debug!(start, fetched, "fetched activity page");
        all.extend(page);
        if (fetched as u32) < page_size {
            break;
        }
        start += page_size;
    }
    tracing::info!(total = all.len(), "fetched activity list");
    Ok(all)
}

/// Merge the start position from each activity's detail payload into the
/// listing record. Detail fetches can fail for individual activities; those
/// records are left as-is.
pub async fn enrich_with_start_position(
    client: &dyn GarminClient,
    activities: &mut [serde_json::Value],
) {
    for raw in activities.iter_mut() {
        let Some(id) = activity_id_str(raw) else {
            continue;
        };
        let details = match client.get_activity_details(&id).await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(activity_id = %id, error = %e, "could not fetch activity details");
                continue;
            }
        };
        if let Some(obj) = raw.as_object_mut() {
            for key in ["startLatitude", "startLongitude"] {
                if let Some(v) = details.get(key) {
                    obj.insert(key.to_string(), v.clone());
                }
            }
        }
    }
}
