//! Generation endpoint integration tests
//!
//! Blackbox tests for POST /api/generate covering validation, pass-through,
//! retry behavior, and error mapping against a mocked backend.

use std::time::{Duration, Instant};

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::RelayTestHarness;

#[tokio::test]
async fn test_success_payload_passes_through_unchanged() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta"}))
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "quick dinner"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"recipe": "pasta"}));
}

#[tokio::test]
async fn test_credential_attached_as_bearer_token() {
    let harness = RelayTestHarness::new().await;
    // The mock only matches when the configured credential arrives as a
    // bearer token, so a 200 proves the header was attached
    harness
        .backend
        .mock_generate_success_requiring_credential(
            &harness.config.generator_api_key,
            json!({"recipe": "soup"}),
        )
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "something warm"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    // The credential travels in the header, never in the body
    let requests = harness.backend.generate_requests().await;
    assert_eq!(requests.len(), 1);
    let outbound_body = String::from_utf8_lossy(&requests[0].body).to_string();
    assert!(!outbound_body.contains(&harness.config.generator_api_key));
}

#[tokio::test]
async fn test_missing_prompt_rejected_without_backend_call() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta"}))
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"something_else": true}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "InvalidPrompt");
    assert_eq!(harness.backend.generate_request_count().await, 0);
}

#[tokio::test]
async fn test_empty_prompt_rejected_without_backend_call() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta"}))
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "   "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "InvalidPrompt");
    assert_eq!(harness.backend.generate_request_count().await, 0);
}

#[tokio::test]
async fn test_over_length_prompt_rejected_without_backend_call() {
    let harness = RelayTestHarness::with(|config| {
        config.max_prompt_chars = 10;
    })
    .await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta"}))
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "a prompt well past ten characters"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "InvalidPrompt");
    assert_eq!(harness.backend.generate_request_count().await, 0);
}

#[tokio::test]
async fn test_malformed_body_rejected_without_backend_call() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta"}))
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .text("this is not json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "MalformedRequest");
    assert_eq!(harness.backend.generate_request_count().await, 0);
}

#[tokio::test]
async fn test_wrong_prompt_type_is_malformed() {
    let harness = RelayTestHarness::new().await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": 42}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "MalformedRequest");
    assert_eq!(harness.backend.generate_request_count().await, 0);
}

#[tokio::test]
async fn test_timeout_retries_once_then_unavailable() {
    // Harness config: 1s per-attempt timeout, 1 retry
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_delayed(json!({"recipe": "late"}), Duration::from_secs(5))
        .await;

    let started = Instant::now();
    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "quick dinner"}))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "BackendUnavailable");

    // Exactly the initial attempt plus one retry
    assert_eq!(harness.backend.generate_request_count().await, 2);

    // Total time bounded by timeout * (1 + retries), plus slack
    let bound = harness.config.request_timeout() * (1 + harness.config.max_retries);
    assert!(
        elapsed < bound + Duration::from_millis(1500),
        "took {:?}, bound {:?}",
        elapsed,
        bound
    );
}

#[tokio::test]
async fn test_backend_500_not_retried_and_not_leaked() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_error(
            500,
            json!({"detail": "Traceback (most recent call last): secret internals"}),
        )
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "quick dinner"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "BackendError");

    // The backend's error body must not reach the client
    let text = response.text();
    assert!(!text.contains("Traceback"));
    assert!(!text.contains("secret internals"));

    // Application errors are never retried
    assert_eq!(harness.backend.generate_request_count().await, 1);
}

#[tokio::test]
async fn test_malformed_success_body_is_backend_error() {
    let harness = RelayTestHarness::new().await;
    harness.backend.mock_generate_garbled().await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "quick dinner"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["error"]["kind"], "BackendError");
    assert_eq!(harness.backend.generate_request_count().await, 1);
}

#[tokio::test]
async fn test_repeated_requests_are_independent() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta", "servings": 2}))
        .await;

    let first = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "quick dinner"}))
        .await;
    let second = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "quick dinner"}))
        .await;

    assert_eq!(first.status_code(), StatusCode::OK);
    assert_eq!(second.status_code(), StatusCode::OK);

    let first_body: Value = first.json();
    let second_body: Value = second.json();
    assert_eq!(first_body, second_body);
    assert_eq!(harness.backend.generate_request_count().await, 2);
}

#[tokio::test]
async fn test_prompt_is_forwarded_trimmed() {
    let harness = RelayTestHarness::new().await;
    harness
        .backend
        .mock_generate_success(json!({"recipe": "pasta"}))
        .await;

    let response = harness
        .server
        .post("/api/generate")
        .json(&json!({"prompt": "  quick dinner  "}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let requests = harness.backend.generate_requests().await;
    assert_eq!(requests.len(), 1);
    let outbound: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(outbound, json!({"prompt": "quick dinner"}));
}
