#![allow(dead_code)]

use std::sync::Arc;

use application::{Clock, SystemClock};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use infrastructure::Infrastructure;
use serde_json::{json, Value};
use tower::ServiceExt;
use web_api::{router, AppState, USER_HEADER};

pub fn build_router() -> Router {
    let infrastructure = Infrastructure::in_memory();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let state = AppState::from_repositories(
        infrastructure.participant_repository,
        infrastructure.message_repository,
        clock,
    );
    router(state)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, user: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::from(body)).expect("request")
}

pub fn empty_request(method: &str, uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header(USER_HEADER, user);
    }
    builder.body(Body::empty()).expect("request")
}

pub async fn register(app: &Router, name: &str) -> StatusCode {
    let body = json!({ "name": name }).to_string();
    send(app, json_request("POST", "/participants", None, body))
        .await
        .0
}

pub async fn post_message(
    app: &Router,
    from: &str,
    to: &str,
    text: &str,
    kind: &str,
) -> (StatusCode, Value) {
    let body = json!({ "to": to, "text": text, "type": kind }).to_string();
    send(app, json_request("POST", "/messages", Some(from), body)).await
}

pub async fn messages_for(app: &Router, user: Option<&str>, query: &str) -> (StatusCode, Value) {
    send(app, empty_request("GET", &format!("/messages{query}"), user)).await
}

pub fn texts(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|message| message["text"].as_str().expect("text").to_owned())
        .collect()
}
