//! In-process tests for the HTTP routes

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use hil_checkpoint::InMemorySessionStore;
use hil_core::{TransformError, Transformer, WorkflowEngine};
use hil_server::{build_engine, create_router, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    create_router(build_engine(&ServerConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn turn(app: &Router, session: &str, input: &str, action: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/workflow/{session}"),
        Some(json!({"input": input, "action": action})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_start_returns_initial_state() {
    let app = app();
    let body = turn(&app, "alice", "", "start").await;

    assert_eq!(body["message"], "Please provide detail #1");
    assert_eq!(body["requiredAction"], "provide_detail");
    assert_eq!(
        body["currentState"],
        json!({
            "collectedDetails": [],
            "detailIndex": 0,
            "transformedOutput": null,
            "transformApproved": false,
            "uploadConfirmed": false,
            "stage": "COLLECTING",
            "message": "Please provide detail #1"
        })
    );
    assert!(body.get("warning").is_none());
}

#[tokio::test]
async fn test_full_walkthrough() {
    let app = app();
    turn(&app, "alice", "", "start").await;
    let mut body = Value::Null;
    for detail in ["a", "b", "c", "d"] {
        body = turn(&app, "alice", detail, "provide_detail").await;
    }

    assert_eq!(body["requiredAction"], "approve_transform");
    assert_eq!(body["currentState"]["stage"], "AWAITING_APPROVAL");
    assert_eq!(
        body["currentState"]["transformedOutput"],
        json!([
            "the transformed data is a",
            "the transformed data is b",
            "the transformed data is c",
            "the transformed data is d"
        ])
    );

    let body = turn(&app, "alice", "", "modify_transform").await;
    assert_eq!(body["requiredAction"], "confirm_upload");
    assert_eq!(body["currentState"]["transformApproved"], true);

    let body = turn(&app, "alice", "", "confirm_upload").await;
    assert_eq!(body["requiredAction"], "complete");
    assert_eq!(body["message"], "Upload complete. Workflow finished.");
    assert_eq!(body["currentState"]["stage"], "COMPLETE");
}

#[tokio::test]
async fn test_mismatched_action_is_soft() {
    let app = app();
    let body = turn(&app, "bob", "", "confirm_upload").await;

    assert_eq!(body["requiredAction"], "provide_detail");
    assert_eq!(body["currentState"]["detailIndex"], 0);
    assert!(body["warning"].as_str().unwrap().contains("confirm_upload"));
}

#[tokio::test]
async fn test_unknown_action_is_soft() {
    let app = app();
    let body = turn(&app, "bob", "x", "teleport").await;

    assert_eq!(body["requiredAction"], "provide_detail");
    assert!(body["warning"].as_str().unwrap().contains("teleport"));
}

#[tokio::test]
async fn test_input_is_optional() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/workflow/carol",
        Some(json!({"action": "provide_detail"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentState"]["collectedDetails"], json!([""]));
}

#[tokio::test]
async fn test_missing_action_is_rejected() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/workflow/carol", Some(json!({"input": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].as_str().unwrap().contains("action"));

    let (_, sessions) = send(&app, Method::GET, "/sessions", None).await;
    assert_eq!(sessions["activeSessions"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_uses_error_shape() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/workflow/carol")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_get_workflow() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/workflow/ghost", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    turn(&app, "dave", "first", "provide_detail").await;
    let (status, body) = send(&app, Method::GET, "/workflow/dave", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentState"]["collectedDetails"], json!(["first"]));
    assert_eq!(body["requiredAction"], "provide_detail");
}

#[tokio::test]
async fn test_sessions_lists_active() {
    let app = app();
    turn(&app, "b", "", "start").await;
    turn(&app, "a", "", "start").await;

    let (status, body) = send(&app, Method::GET, "/sessions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activeSessions"], json!(["a", "b"]));
}

#[tokio::test]
async fn test_blank_session_id_is_bad_request() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/workflow/%20",
        Some(json!({"action": "start"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SESSION");
}

struct BrokenTransformer;

#[async_trait]
impl Transformer for BrokenTransformer {
    async fn transform(&self, _details: &[String]) -> Result<Vec<String>, TransformError> {
        Err(TransformError::failed("upstream credentials rejected"))
    }
}

#[tokio::test]
async fn test_engine_fault_is_generic_500() {
    let engine = WorkflowEngine::new(Arc::new(InMemorySessionStore::new()))
        .with_transformer(Arc::new(BrokenTransformer));
    let app = create_router(Arc::new(engine));

    for detail in ["a", "b", "c"] {
        turn(&app, "eve", detail, "provide_detail").await;
    }
    let (status, body) = send(
        &app,
        Method::POST,
        "/workflow/eve",
        Some(json!({"input": "d", "action": "provide_detail"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Something went wrong");
    assert!(!body.to_string().contains("credentials"));

    let (_, snapshot) = send(&app, Method::GET, "/workflow/eve", None).await;
    assert_eq!(snapshot["currentState"]["detailIndex"], 3);
}
