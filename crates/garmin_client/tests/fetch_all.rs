use garmin_client::http_client::ReqwestGarminClient;
use garmin_client::retry::RetryPolicy;
use secrecy::SecretString;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": "session-tok"})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_all_activities_pages_until_short_page() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let page1 = serde_json::json!([
        {"activityId": 1, "activityName": "Run 1"},
        {"activityId": 2, "activityName": "Run 2"}
    ]);
    Mock::given(method("GET"))
        .and(path("/activitylist-service/activities/search/activities"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page1))
        .mount(&server)
        .await;

    let page2 = serde_json::json!([
        {"activityId": 3, "activityName": "Run 3"}
    ]);
    Mock::given(method("GET"))
        .and(path("/activitylist-service/activities/search/activities"))
        .and(query_param("start", "2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page2))
        .mount(&server)
        .await;

    let client = ReqwestGarminClient::new(
        &server.uri(),
        "rider@example.com",
        SecretString::new("pw".into()),
    );
    let policy = RetryPolicy {
        max_retries: 0,
        base_delay: std::time::Duration::from_millis(1),
    };

    let all = garmin_client::fetch_all_activities(&client, 2, &policy)
        .await
        .expect("all pages");
    assert_eq!(all.len(), 3);
    assert_eq!(
        garmin_client::activity_id_str(&all[2]).as_deref(),
        Some("3")
    );
}

#[tokio::test]
async fn fetch_all_retries_transient_server_errors() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    // First attempt fails with a 500, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/activitylist-service/activities/search/activities"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let body = serde_json::json!([{"activityId": 7, "activityName": "Swim"}]);
    Mock::given(method("GET"))
        .and(path("/activitylist-service/activities/search/activities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = ReqwestGarminClient::new(
        &server.uri(),
        "rider@example.com",
        SecretString::new("pw".into()),
    );
    let policy = RetryPolicy {
        max_retries: 2,
        base_delay: std::time::Duration::from_millis(1),
    };

    let all = garmin_client::fetch_all_activities(&client, 10, &policy)
        .await
        .expect("retried fetch");
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn enrich_with_start_position_merges_detail_coordinates() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/activity-service/activity/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "activityId": 1,
            "startLatitude": 52.37,
            "startLongitude": 4.89
        })))
        .mount(&server)
        .await;

    // Details for activity 2 are unavailable; the record must survive unchanged.
    Mock::given(method("GET"))
        .and(path("/activity-service/activity/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ReqwestGarminClient::new(
        &server.uri(),
        "rider@example.com",
        SecretString::new("pw".into()),
    );

    let mut activities = vec![
        serde_json::json!({"activityId": 1, "activityName": "Run"}),
        serde_json::json!({"activityId": 2, "activityName": "Ride"}),
    ];
    garmin_client::enrich_with_start_position(&client, &mut activities).await;

    assert_eq!(
        activities[0].get("startLatitude").and_then(|v| v.as_f64()),
        Some(52.37)
    );
    assert!(activities[1].get("startLatitude").is_none());
}
