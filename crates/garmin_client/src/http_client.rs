//! HTTP client implementation for the Garmin Connect API.
//!
//! This module provides a reqwest-based implementation of the
//! [`GarminClient`](crate::GarminClient) trait. Authentication is a token
//! exchange: credentials are posted once and the returned session token is
//! sent as a bearer header on every subsequent request.

use crate::observability::record_api_request;
use crate::{GarminClient, GarminError, UserProfile};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// Client for the Garmin Connect API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestGarminClient {
    base_url: String,
    email: String,
    password: SecretString,
    client: reqwest::Client,
    token: Arc<Mutex<Option<String>>>,
}

impl ReqwestGarminClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Garmin Connect API (e.g., "https://connectapi.garmin.com")
    /// * `email` - The account email used for login
    /// * `password` - The account password used for login
    pub fn new(base_url: &str, email: impl Into<String>, password: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            email: email.into(),
            password,
            client,
            token: Arc::new(Mutex::new(None)),
        }
    }

    /// Exchange credentials for a session token. Called lazily by the first
    /// authenticated request; calling it again refreshes the token.
    pub async fn login(&self) -> Result<(), GarminError> {
        let url = format!("{}/auth/login", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": self.email,
                "password": self.password.expose_secret(),
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(256).collect();
            record_api_request("login", "error");
            return Err(GarminError::Auth(snippet));
        }

        let login: LoginResponse = resp.json().await?;
        let mut token = self.token.lock().await;
        *token = Some(login.token);
        record_api_request("login", "ok");
        tracing::info!("authenticated with Garmin Connect");
        Ok(())
    }

    /// Return the current session token, logging in first if needed.
    async fn session_token(&self) -> Result<String, GarminError> {
        {
            let token = self.token.lock().await;
            if let Some(t) = token.as_ref() {
                return Ok(t.clone());
            }
        }
        self.login().await?;
        let token = self.token.lock().await;
        token
            .clone()
            .ok_or_else(|| GarminError::Auth("login did not produce a token".into()))
    }

    /// Build an authenticated GET request.
    async fn get_request(&self, url: &str) -> Result<reqwest::RequestBuilder, GarminError> {
        let token = self.session_token().await?;
        Ok(self.client.get(url).bearer_auth(token))
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &'static str,
    ) -> Result<T, GarminError> {
        let resp = request.send().await.inspect_err(|_| {
            record_api_request(endpoint, "error");
        })?;
        let status = resp.status();
        if !status.is_success() {
            record_api_request(endpoint, "error");
            return Err(self.error_from_response(resp).await);
        }
        record_api_request(endpoint, "ok");
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> GarminError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();

        match status {
            404 => GarminError::NotFound(body_snippet),
            401 | 403 => GarminError::Auth(body_snippet),
            422 => GarminError::InvalidInput(body_snippet),
            429 => GarminError::RateLimited(body_snippet),
            _ => GarminError::from_status(status, body_snippet),
        }
    }
}

#[async_trait]
impl GarminClient for ReqwestGarminClient {
    async fn get_user_profile(&self) -> Result<UserProfile, GarminError> {
        let url = format!("{}/userprofile-service/socialProfile", self.base_url);
        let request = self.get_request(&url).await?;
        self.execute_json(request, "profile").await
    }

    async fn get_activities(
        &self,
        start: u32,
        limit: u32,
    ) -> Result<Vec<serde_json::Value>, GarminError> {
        let url = format!(
            "{}/activitylist-service/activities/search/activities",
            self.base_url
        );
        let request = self
            .get_request(&url)
            .await?
            .query(&[("start", start), ("limit", limit)]);
        self.execute_json(request, "activities").await
    }

    async fn get_activity_details(
        &self,
        activity_id: &str,
    ) -> Result<serde_json::Value, GarminError> {
        let url = format!(
            "{}/activity-service/activity/{}",
            self.base_url, activity_id
        );
        let request = self.get_request(&url).await?;
        self.execute_json(request, "activity_details").await
    }
}
