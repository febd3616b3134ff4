//! Wire types for the Reqlytics API
//!
//! These mirror the service's JSON payloads exactly. Aggregate counters come
//! over the wire as strings; parsing into numbers happens in the stats domain
//! layer, not here.

use serde::Deserialize;

/// `POST /api/v1/auth/login` response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub api_key: String,
}

/// `GET /api/v1/auth/verify` response
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// `GET /api/v1/subscribe/plan` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct PlanResponse {
    pub data: PlanData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanData {
    pub plan: String,
}

/// `PATCH /api/v1/subscribe/change-plan` response
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePlanResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /stats` response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatsPayload,
}

/// Aggregated usage statistics as the service serializes them
#[derive(Debug, Clone, Deserialize)]
pub struct StatsPayload {
    pub summary: WireSummary,
    pub endpoints: Vec<WireEndpoint>,
    pub daily: Vec<WireDaily>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireSummary {
    pub total_requests: String,
    pub avg_response_time: String,
    pub server_errors: String,
    pub client_errors: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireEndpoint {
    pub endpoint: String,
    pub total: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDaily {
    pub day: String,
    pub total: String,
}
