mod common;

use axum::http::{Method, StatusCode};
use common::build_test_app;

#[tokio::test]
async fn health_and_readiness() {
    let app = build_test_app().await;

    let (status, body) = app.send(Method::GET, "/api/v1/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, body) = app.send(Method::GET, "/api/v1/readyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = build_test_app().await;
    let (status, _) = app.send(Method::GET, "/api/v1/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
