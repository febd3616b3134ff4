//! Remote stats/plan client
//!
//! A thin, one-shot request layer over the Reqlytics service. No retry,
//! backoff, or circuit breaking lives here; failed calls surface a typed
//! [`ApiError`] and the caller (workflow or poll tick) decides what happens
//! next.
//!
//! The subscription endpoints validate the response content-type before
//! parsing: a misconfigured reverse proxy answering with an HTML error page
//! must show up as a protocol error, not a JSON decode panic three layers up.

mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::ApiError;

use crate::session::plan::Plan;
use async_trait::async_trait;
use models::{ChangePlanResponse, LoginResponse, PlanResponse, StatsPayload, StatsResponse, VerifyResponse};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde_json::json;

/// Header carrying the dashboard API key on stats requests
const API_KEY_HEADER: &str = "x-api-key";

/// Credentials handed back by a successful login
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: String,
    pub api_key: String,
}

/// Subscription operations the session controller depends on.
///
/// Kept as a trait so the controller can be exercised against a scripted
/// implementation in tests; [`ApiClient`] is the real one.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    /// Fetch the server-authoritative plan for the signed-in user
    async fn fetch_plan(&self, token: &str) -> Result<Plan, ApiError>;

    /// Switch the subscription to `plan`, optionally attaching a payment
    /// confirmation payload from the checkout gateway
    async fn change_plan(
        &self,
        token: &str,
        plan: Plan,
        payment: Option<&serde_json::Value>,
    ) -> Result<(), ApiError>;
}

/// HTTP client for the Reqlytics service
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against `base_url` (no trailing slash expected).
    ///
    /// No request timeout is configured; the transport's defaults govern.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /api/v1/auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, ApiError> {
        let response = self
            .http
            .post(self.url("/api/v1/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        let body: LoginResponse = response.json().await.map_err(ApiError::from_transport)?;

        if status.is_success() && body.success {
            Ok(Credentials {
                token: body.token,
                api_key: body.api_key,
            })
        } else {
            Err(ApiError::Application(
                "Invalid email or password. Please try again.".to_string(),
            ))
        }
    }

    /// `GET /api/v1/auth/verify?token=...`
    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .get(self.url("/api/v1/auth/verify"))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        let body: VerifyResponse = response.json().await.map_err(ApiError::from_transport)?;

        if status.is_success() && body.success {
            Ok(())
        } else {
            Err(ApiError::Application(body.error.unwrap_or_else(|| {
                "Verification failed. Token may be invalid or expired.".to_string()
            })))
        }
    }

    /// `GET /stats` with the API key header
    pub async fn fetch_stats(&self, api_key: &str) -> Result<StatsPayload, ApiError> {
        let response = self
            .http
            .get(self.url("/stats"))
            .header(API_KEY_HEADER, api_key)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Application(format!(
                "Failed to fetch stats: {}",
                status.as_u16()
            )));
        }

        let body: StatsResponse = response.json().await.map_err(ApiError::from_transport)?;
        if !body.success {
            return Err(ApiError::Application(
                "Stats request was not successful".to_string(),
            ));
        }
        Ok(body.data)
    }
}

#[async_trait]
impl SubscriptionApi for ApiClient {
    async fn fetch_plan(&self, token: &str) -> Result<Plan, ApiError> {
        let response = self
            .http
            .get(self.url("/api/v1/subscribe/plan"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        expect_json(&response)?;

        let status = response.status();
        if !status.is_success() {
            return Err(status_error("Failed to fetch plan", status));
        }

        let body: PlanResponse = response.json().await.map_err(ApiError::from_transport)?;
        Ok(Plan::from_id(&body.data.plan))
    }

    async fn change_plan(
        &self,
        token: &str,
        plan: Plan,
        payment: Option<&serde_json::Value>,
    ) -> Result<(), ApiError> {
        let mut body = json!({ "plan": plan.id() });
        if let Some(confirmation) = payment {
            body["paymentResponse"] = confirmation.clone();
        }

        let response = self
            .http
            .patch(self.url("/api/v1/subscribe/change-plan"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        expect_json(&response)?;

        let status = response.status();
        let reply: ChangePlanResponse = response.json().await.map_err(ApiError::from_transport)?;

        if let Some(message) = reply.error {
            return Err(ApiError::Application(message));
        }
        if !status.is_success() {
            return Err(status_error("Failed to update plan", status));
        }

        tracing::debug!("Plan change accepted: {:?}", reply.data);
        Ok(())
    }
}

/// Reject responses whose content-type is not JSON before touching the body.
fn expect_json(response: &Response) -> Result<(), ApiError> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    if content_type.starts_with("application/json") {
        Ok(())
    } else {
        let shown = if content_type.is_empty() {
            "no content-type"
        } else {
            content_type
        };
        Err(ApiError::Protocol(format!(
            "expected JSON, got `{}` (status {})",
            shown,
            response.status().as_u16()
        )))
    }
}

fn status_error(prefix: &str, status: StatusCode) -> ApiError {
    ApiError::Application(format!("{} (status {})", prefix, status.as_u16()))
}
