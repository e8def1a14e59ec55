//! File boundary: raw activity batches in, dashboard snapshots out.

use crate::error::DashboardResult;
use crate::types::DashboardSnapshot;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Load the raw activity batch written by a previous fetch. A missing file
/// is an empty batch, not an error.
pub async fn load_raw_activities(path: &Path) -> DashboardResult<Vec<Value>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no activities file found, starting empty");
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

/// Persist a raw activity batch as pretty-printed JSON.
pub async fn save_raw_activities(path: &Path, activities: &[Value]) -> DashboardResult<()> {
    write_json(path, &activities).await
}

/// Persist a snapshot as pretty-printed JSON for the static dashboard page.
pub async fn save_snapshot(path: &Path, snapshot: &DashboardSnapshot) -> DashboardResult<()> {
    write_json(path, snapshot).await
}

async fn write_json<T: Serialize>(path: &Path, value: &T) -> DashboardResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let text = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_file_loads_as_empty_batch() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("activities.json");
        let batch = load_raw_activities(&path).await.expect("load");
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested/data/activities.json");
        let batch = vec![json!({"activityId": 1}), json!({"activityId": 2})];

        save_raw_activities(&path, &batch).await.expect("save");
        let loaded = load_raw_activities(&path).await.expect("load");
        assert_eq!(loaded, batch);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("activities.json");
        tokio::fs::write(&path, "not json").await.expect("write");
        assert!(load_raw_activities(&path).await.is_err());
    }
}
