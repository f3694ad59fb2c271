//! Helpers for driving the router in handler tests

use crate::services::TaskManager;
use crate::storage::MemoryTaskStore;
use crate::templates::Templates;
use crate::{build_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{request::Builder, Method, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_app_with_store() -> (Router, Arc<MemoryTaskStore>) {
    let store = Arc::new(MemoryTaskStore::new());
    let state = AppState {
        tasks: Arc::new(TaskManager::new(store.clone())),
        templates: Arc::new(Templates::new().expect("embedded templates should parse")),
    };
    (build_router(state), store)
}

pub fn test_app() -> Router {
    test_app_with_store().0
}

pub fn builder(method: Method, uri: &str) -> Builder {
    Request::builder().method(method).uri(uri)
}

pub fn request(method: Method, uri: &str) -> Request<Body> {
    builder(method, uri).body(Body::empty()).unwrap()
}

pub fn form(method: Method, uri: &str, body: &'static str) -> Request<Body> {
    builder(method, uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response {
    let req = builder(method, uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn read_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn read_json(response: Response) -> Value {
    serde_json::from_str(&read_body(response).await).unwrap()
}
