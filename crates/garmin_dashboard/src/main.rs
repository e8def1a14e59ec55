use std::path::PathBuf;

use chrono::Utc;
use garmin_client::http_client::ReqwestGarminClient;
use garmin_client::retry::RetryPolicy;
use garmin_dashboard::{PipelineConfig, pipeline, storage};

const FETCH_PAGE_SIZE: u32 = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `GARMIN_DASHBOARD_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("GARMIN_DASHBOARD_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "run".to_string());
    match command.as_str() {
        "fetch" => fetch().await?,
        "process" => process().await?,
        "run" => {
            fetch().await?;
            process().await?;
        }
        other => anyhow::bail!("unknown command: {other} (expected fetch, process or run)"),
    }

    Ok(())
}

fn activities_file() -> PathBuf {
    let dir = std::env::var("GARMIN_DASHBOARD_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    PathBuf::from(dir).join("activities.json")
}

fn snapshot_file() -> PathBuf {
    let dir = std::env::var("GARMIN_DASHBOARD_SITE_DIR").unwrap_or_else(|_| "docs".to_string());
    PathBuf::from(dir).join("dashboard_data.json")
}

async fn fetch() -> anyhow::Result<()> {
    let cfg = garmin_client::config::Config::from_env()?;
    let client = ReqwestGarminClient::new(&cfg.base_url, cfg.email.clone(), cfg.password);
    client.login().await?;

    let mut activities =
        garmin_client::fetch_all_activities(&client, FETCH_PAGE_SIZE, &RetryPolicy::default())
            .await?;
    garmin_client::enrich_with_start_position(&client, &mut activities).await;

    let path = activities_file();
    storage::save_raw_activities(&path, &activities).await?;
    tracing::info!(total = activities.len(), path = %path.display(), "saved raw activities");
    Ok(())
}

async fn process() -> anyhow::Result<()> {
    let config = PipelineConfig::from_env()?;
    let raw = storage::load_raw_activities(&activities_file()).await?;

    let run = pipeline::build_snapshot(&raw, &config, Utc::now())?;

    let path = snapshot_file();
    storage::save_snapshot(&path, &run.snapshot).await?;
    tracing::info!(
        activities = run.snapshot.summary.total_activities,
        recent = run.snapshot.recent_activities.len(),
        skipped = run.skipped,
        path = %path.display(),
        "dashboard data processing completed"
    );
    Ok(())
}
