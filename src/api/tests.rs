//! Client tests against a mock HTTP server
//!
//! Every test drives the real reqwest stack against wiremock, so header
//! names, bodies, and the content-type guard are exercised exactly as they
//! run in production.

use super::*;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(server.uri())
}

// ─────────────────────────────────────────────────────────────────────────────
// Login / verification
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_returns_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_partial_json(serde_json::json!({
            "email": "user@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "token": "t1",
            "api_key": "k1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = client(&server)
        .login("user@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(credentials.token, "t1");
    assert_eq!(credentials.api_key, "k1");
}

#[tokio::test]
async fn test_login_rejection_is_an_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({ "success": false })),
        )
        .mount(&server)
        .await;

    let err = client(&server).login("user@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.kind(), "application");
    assert!(err.to_string().contains("Invalid email or password"));
}

#[tokio::test]
async fn test_login_success_flag_false_despite_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })),
        )
        .mount(&server)
        .await;

    let err = client(&server).login("user@example.com", "pw").await.unwrap_err();
    assert_eq!(err.kind(), "application");
}

#[tokio::test]
async fn test_verify_email_passes_token_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/verify"))
        .and(query_param("token", "abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client(&server).verify_email("abc123").await.unwrap();
}

#[tokio::test]
async fn test_verify_email_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/verify"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "error": "Token expired"
        })))
        .mount(&server)
        .await;

    let err = client(&server).verify_email("old").await.unwrap_err();
    assert_eq!(err.to_string(), "Token expired");
}

// ─────────────────────────────────────────────────────────────────────────────
// Plan fetch / change
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_plan_parses_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/subscribe/plan"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "plan": "premium" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let plan = client(&server).fetch_plan("t1").await.unwrap();
    assert_eq!(plan, Plan::Premium);
}

#[tokio::test]
async fn test_fetch_plan_html_body_is_a_protocol_error() {
    // A misconfigured reverse proxy answering with an HTML error page
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/subscribe/plan"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>Bad Gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = client(&server).fetch_plan("t1").await.unwrap_err();
    assert_eq!(err.kind(), "protocol");
    assert!(err.to_string().contains("text/html"));
}

#[tokio::test]
async fn test_change_plan_sends_plan_and_payment() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/subscribe/change-plan"))
        .and(header("authorization", "Bearer t1"))
        .and(body_partial_json(serde_json::json!({
            "plan": "enterprise",
            "paymentResponse": { "reference": "rql-1" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": {} })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let payment = serde_json::json!({ "reference": "rql-1" });
    client(&server)
        .change_plan("t1", Plan::Enterprise, Some(&payment))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_plan_omits_payment_for_free() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/subscribe/change-plan"))
        .and(body_partial_json(serde_json::json!({ "plan": "free" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": {} })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client(&server).change_plan("t1", Plan::Free, None).await.unwrap();
}

#[tokio::test]
async fn test_change_plan_non_json_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/subscribe/change-plan"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_raw("<html>502 Bad Gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .change_plan("t1", Plan::Premium, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "protocol");
}

#[tokio::test]
async fn test_change_plan_error_field_wins() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/subscribe/change-plan"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "Payment could not be verified"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .change_plan("t1", Plan::Premium, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "application");
    assert_eq!(err.to_string(), "Payment could not be verified");
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_stats_uses_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .and(header("x-api-key", "k1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "summary": {
                    "total_requests": "42",
                    "avg_response_time": "10.5",
                    "server_errors": "1",
                    "client_errors": "2"
                },
                "endpoints": [],
                "daily": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server).fetch_stats("k1").await.unwrap();
    assert_eq!(payload.summary.total_requests, "42");
}

#[tokio::test]
async fn test_fetch_stats_500_is_an_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).fetch_stats("k1").await.unwrap_err();
    assert_eq!(err.kind(), "application");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    // Port 9 (discard) is about as unreachable as it gets
    let client = ApiClient::new("http://127.0.0.1:9");
    let err = client.fetch_stats("k1").await.unwrap_err();
    assert_eq!(err.kind(), "network");
}
