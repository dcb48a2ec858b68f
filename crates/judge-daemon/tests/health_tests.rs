// SPDX-License-Identifier: MIT OR Apache-2.0
//! Health and schema endpoint tests, mirroring the teacher's
//! `abp-daemon/tests/health_tests.rs` oneshot-request style.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use judge_core::ResourcePolicy;
use judge_daemon::{build_app, AppState};
use judge_pipeline::ExecutorRegistry;
use judge_sandbox_paths::SandboxRoots;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        roots: SandboxRoots {
            container_root: std::env::temp_dir(),
            host_root: "/tmp".to_string(),
        },
        policy: ResourcePolicy::default(),
        registry: ExecutorRegistry::new(),
        started_at: Instant::now(),
    })
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

#[tokio::test]
async fn health_reports_ok_and_contract_version() {
    let app = build_app(test_state());
    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["contract_version"], judge_core::CONTRACT_VERSION);
}

#[tokio::test]
async fn schema_publishes_request_and_response_shapes() {
    let app = build_app(test_state());
    let (status, body) = get_json(app, "/schema").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("request").is_some());
    assert!(body.get("response").is_some());
}

#[tokio::test]
async fn execute_rejects_empty_source_code() {
    let app = build_app(test_state());
    let payload = serde_json::json!({
        "language": "python",
        "source_code": "",
        "function_name": "solve",
        "test_cases": [{"input": {"x": 1}, "expected_output": 1}]
    });

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/execute")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn execute_rejects_an_unsupported_language_with_a_detail_body() {
    let app = build_app(test_state());
    let payload = serde_json::json!({
        "language": "cobol",
        "source_code": "def solve(x): return x",
        "function_name": "solve",
        "test_cases": [{"input": {"x": 1}, "expected_output": 1}]
    });

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/execute")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Unsupported language");
}
