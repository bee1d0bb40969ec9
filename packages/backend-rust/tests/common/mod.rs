#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use playlearn_algo::ResultRecord;
use playlearn_backend::config::Config;
use playlearn_backend::state::AppState;
use playlearn_backend::store::{LogError, ResultLog};

pub async fn create_test_app() -> Router {
    playlearn_backend::build_app(AppState::in_memory(Config::default()))
}

pub fn create_app_with_log(log: Arc<dyn ResultLog>) -> Router {
    playlearn_backend::build_app(AppState::new(Config::default(), log))
}

/// A log whose appends always fail.
pub struct UnavailableLog;

impl ResultLog for UnavailableLog {
    fn append(&self, _profile: &str, _record: ResultRecord) -> Result<(), LogError> {
        Err(LogError::Unavailable("connection refused".to_string()))
    }

    fn list(&self, _profile: &str) -> Result<Vec<ResultRecord>, LogError> {
        Err(LogError::Unavailable("connection refused".to_string()))
    }
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_empty(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
