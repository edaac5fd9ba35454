//! Shared helpers for the HTTP integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ideas_board::app::{build_router, build_state};
use ideas_board::config::Config;
use ideas_board::repos::Store;

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .expect("memory config should load")
}

/// Full router (same middleware stack as production) over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_test_app_with(Store::memory())
}

pub fn build_test_app_with(store: Store) -> Router {
    let config = test_config();
    let state = build_state(&config, store).expect("state should build");
    build_router(state, &config)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an idea through the API and return its JSON.
pub async fn create_idea(app: &Router, title: &str) -> Value {
    let response = post_json(app, "/ideas", serde_json::json!({ "title": title })).await;
    assert_eq!(response.status(), 201);
    body_json(response).await
}
