// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
//! judge-daemon
//!
//! Thin Axum shim over `judge-pipeline` (spec §6): `POST /execute` runs a
//! request to a terminal verdict, `GET /health` reports liveness, `GET
//! /schema` publishes the JSON Schema for the wire types. No business logic
//! lives here, the same way the original's `api/main.py` was a 12-line
//! FastAPI shim over `ExecutionPipeline`.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use judge_core::{ExecutionRequest, Language, TestCase, Verdict, CONTRACT_VERSION};
use judge_error::InputError;
use judge_pipeline::{run_request, ExecutorRegistry};
use judge_sandbox_paths::SandboxRoots;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Shared server state.
pub struct AppState {
    /// Host/container sandbox path resolver.
    pub roots: SandboxRoots,
    /// Resource budget applied to every request's sandbox.
    pub policy: judge_core::ResourcePolicy,
    /// Executor dispatch.
    pub registry: ExecutorRegistry,
    /// Process start time, for `/health` uptime.
    pub started_at: Instant,
}

/// The `POST /execute` request body: the same fields `ExecutionRequest::new`
/// validates, deserialized separately so a malformed body never bypasses
/// that validation by landing directly in an already-trusted type.
#[derive(Debug, Deserialize)]
pub struct ExecuteBody {
    /// Language tag.
    pub language: Language,
    /// User-supplied source snippet.
    pub source_code: String,
    /// Name of the callable entry point to invoke.
    pub function_name: String,
    /// Ordered test cases.
    pub test_cases: Vec<TestCase>,
}

/// A structured API error, mirroring the teacher's `ApiError` shape.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // `detail`, not `error`: the original FastAPI service raised every
        // boundary rejection via `HTTPException(status_code=..., detail=...)`.
        (self.status, Json(json!({ "detail": self.message }))).into_response()
    }
}

/// Build the Axum router with all daemon routes.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(cmd_health))
        .route("/execute", post(cmd_execute))
        .route("/schema", get(cmd_schema))
        .with_state(state)
}

async fn cmd_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "contract_version": CONTRACT_VERSION,
        "time": Utc::now().to_rfc3339(),
        "uptime_seconds": state.started_at.elapsed().as_secs(),
    }))
}

async fn cmd_schema() -> impl IntoResponse {
    Json(json!({
        "request": schemars::schema_for!(ExecutionRequest),
        "response": schemars::schema_for!(Verdict),
    }))
}

/// Parse the raw request body into [`ExecuteBody`], surfacing an unknown
/// `language` tag as [`InputError::UnsupportedLanguage`] rather than letting
/// Axum's `Json<T>` extractor reject it first.
///
/// `Language`'s `Deserialize` impl fails the whole body the moment the tag
/// doesn't match one of the ten known variants, before this handler's body
/// ever runs — so a `Json<ExecuteBody>` extractor argument would hand back
/// Axum's generic rejection instead of spec's `{"detail": "Unsupported
/// language"}` 400. Checking the tag against a plain JSON value first,
/// exactly as the original's `except ValueError` branch did around
/// `ExecutionPipeline(req.model_dump())`, keeps that contract.
fn parse_execute_body(bytes: &[u8]) -> Result<ExecuteBody, ApiError> {
    let raw: Value = serde_json::from_slice(bytes)
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid JSON body: {e}")))?;

    let language_tag = raw
        .get("language")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "missing \"language\" field"))?;
    if !Language::ALL.iter().any(|lang| lang.as_tag() == language_tag) {
        return Err(InputError::UnsupportedLanguage.into());
    }

    serde_json::from_value(raw).map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("invalid request body: {e}")))
}

async fn cmd_execute(State(state): State<Arc<AppState>>, bytes: Bytes) -> Result<Json<Verdict>, ApiError> {
    let body = parse_execute_body(&bytes)?;
    let request = ExecutionRequest::new(body.language, body.source_code, body.function_name, body.test_cases)?;

    let workspace_roots = state.roots.clone();
    let executor = state.registry.build(&request, workspace_roots, state.policy.clone());

    info!(language = request.language.as_tag(), "executing request");
    let verdict = run_request(&request, executor).await;

    match &verdict {
        Verdict::CompilationError { error_message } => {
            error!(error = %error_message, "compilation error");
        }
        Verdict::RuntimeError { error_message, .. } => {
            info!(error = %error_message, "runtime error");
        }
        _ => {}
    }

    Ok(Json(verdict))
}
