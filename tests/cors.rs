mod common;

use axum::body::Body;
use axum::http::{StatusCode, header};
use common::{app, app_with, config, request};
use tower::ServiceExt;

fn from_origin(origin: &str) -> axum::http::Request<Body> {
    request("GET", "/api/v1/health")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn allowlisted_origin_gets_credentials_outside_production() {
    let mut config = config(false);
    config.cors_allowed_origins = vec!["http://ui.test".into()];
    let app = app_with(config);

    let response = app
        .router
        .clone()
        .oneshot(from_origin("http://ui.test"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://ui.test"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );

    let other = app
        .router
        .clone()
        .oneshot(from_origin("http://elsewhere.test"))
        .await
        .expect("response");
    assert!(other.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn development_without_allowlist_is_permissive() {
    let response = app()
        .router
        .oneshot(from_origin("http://ui.test"))
        .await
        .expect("response");

    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
}
