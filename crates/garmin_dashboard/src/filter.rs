//! Allow-list gate over canonical activities.

use crate::config::PipelineConfig;
use crate::types::CanonicalActivity;

/// Keep only activities whose type is in the configured allow-list,
/// preserving relative order. Records are already type-valid when they come
/// out of normalization; this gate exists so a narrowed allow-list applies
/// without re-normalizing.
pub fn filter_allowed(
    activities: Vec<CanonicalActivity>,
    config: &PipelineConfig,
) -> Vec<CanonicalActivity> {
    let mut kept = activities;
    kept.retain(|a| config.is_allowed(&a.kind));
    kept
}
