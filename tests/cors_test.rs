use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use shortlink::registry::{AppState, LinkRegistry};
use shortlink::route::create_app;

fn setup_test_app() -> (axum::Router, LinkRegistry) {
    let registry = LinkRegistry::new();
    let state = AppState::new(registry.clone(), "https://fer.link/");
    (create_app(state), registry)
}

fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "POST, OPTIONS"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "Content-Type"
    );
}

#[tokio::test]
async fn test_preflight_returns_ok_with_cors_headers() {
    let (app, registry) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/shorten")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(response.headers());

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_preflight_ignores_body() {
    let (app, registry) = setup_test_app();

    // Wrong content type and an unparsable body would fail on POST
    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/shorten")
                .header("content-type", "text/plain")
                .body(Body::from("definitely { not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(response.headers());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_shorten_success_has_cors_headers() {
    let (app, _registry) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/shorten")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "url": "https://example.com" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(response.headers());
}

#[tokio::test]
async fn test_shorten_errors_have_cors_headers() {
    let (app, _registry) = setup_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/shorten")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_cors_headers(response.headers());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/shorten")
                .header("content-type", "application/json")
                .body(Body::from("[1, 2"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(response.headers());
}

#[tokio::test]
async fn test_redirect_has_no_cors_headers() {
    let (app, registry) = setup_test_app();
    registry.insert("AbC123", "https://example.com/page");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/AbC123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
