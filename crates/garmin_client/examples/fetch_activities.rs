use garmin_client::{GarminClient, config::Config, http_client::ReqwestGarminClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env()?;
    let client = ReqwestGarminClient::new(&cfg.base_url, cfg.email.clone(), cfg.password);

    let limit = std::env::var("GARMIN_FETCH_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(10);

    let activities = client
        .get_activities(0, limit)
        .await
        .map_err(|e| format!("failed to fetch activities: {}", e))?;

    if activities.is_empty() {
        println!("No activities returned (check credentials)");
        return Ok(());
    }

    println!("Most recent activities (limit {}):", limit);
    for a in activities {
        let id = garmin_client::activity_id_str(&a).unwrap_or_else(|| "(no id)".to_string());
        let name = a
            .get("activityName")
            .and_then(|v| v.as_str())
            .unwrap_or("(no name)");
        println!("- {} — {}", id, name);
    }

    Ok(())
}
