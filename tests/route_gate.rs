mod common;

use axum::http::StatusCode;
use common::{app, location, set_cookie_for, set_cookies, with_cookies};
use tower::ServiceExt;

#[tokio::test]
async fn unauthenticated_navigation_redirects_to_sign_in() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies("GET", "/instructor/create", ""))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "/signin?callbackUrl=%2Finstructor%2Fcreate"
    );
}

#[tokio::test]
async fn lesson_without_enrollment_flag_redirects_to_course() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies(
            "GET",
            "/courses/abc123/lesson/xyz",
            "firebase-auth-token=t; user-role=student",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location(&response),
        "/courses/abc123?enrollmentRequired=true"
    );
}

#[tokio::test]
async fn allowed_lesson_refreshes_enrollment_flag() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies(
            "GET",
            "/courses/abc123/lesson/xyz",
            "firebase-auth-token=t; user-role=student; enrolled-abc123=true",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    let refreshed = set_cookie_for(&cookies, "enrolled-abc123").expect("refreshed flag");
    assert!(refreshed.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn instructor_is_denied_admin_pages() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies(
            "GET",
            "/admin/users",
            "firebase-auth-token=t; user-role=instructor",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/access-denied");

    let denied = app
        .router
        .clone()
        .oneshot(with_cookies("GET", "/access-denied", "user-role=instructor"))
        .await
        .expect("response");
    assert_eq!(denied.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn sign_in_page_is_served_to_signed_in_users() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies(
            "GET",
            "/signin",
            "firebase-auth-token=t; user-role=admin",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn api_paths_bypass_the_gate() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies("GET", "/api/v1/health", ""))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let missing = app
        .router
        .clone()
        .oneshot(with_cookies("GET", "/api/v1/nope", ""))
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(common::read_json(missing).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(with_cookies("GET", "/", ""))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
    assert_eq!(response.headers()["x-frame-options"], "DENY");
}
