#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use techhive_api::auth::{generate_token, Claims};
use techhive_api::routes;

// The router is built fresh per request and driven in-process with
// tower's oneshot, so these tests need no running server and no store.
// Only routes that answer before touching the store belong here.

pub fn app() -> Router {
    routes::app()
}

pub async fn send(request: Request<Body>) -> Response<Body> {
    app().oneshot(request).await.expect("router is infallible")
}

/// A token signed with the same secret the router validates with
pub fn bearer_token_for(email: &str) -> String {
    let claims = Claims::new(email.to_string());
    generate_token(claims).expect("token generation")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    let value = format!("Bearer {}", token)
        .parse()
        .expect("authorization header value");
    request.headers_mut().insert(header::AUTHORIZATION, value);
    request
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("JSON body")
}
