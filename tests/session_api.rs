mod common;

use axum::body::Body;
use axum::http::{StatusCode, header};
use common::{app, authed, id_token, read_json, request, set_cookie_for, set_cookies};
use coursegate::repos::{EnrollmentStore, IdentityStore};
use tower::ServiceExt;

#[tokio::test]
async fn sign_in_writes_the_session_mirror() {
    let app = app();
    app.backend.enroll("u1", "c1").await.unwrap();
    app.backend.enroll("u1", "c2").await.unwrap();

    let token = id_token("u1", Some("u1@example.com"), &["instructor"]);
    let response = app
        .router
        .clone()
        .oneshot(authed("POST", "/api/v1/session", &token))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    let auth = set_cookie_for(&cookies, "firebase-auth-token").expect("auth cookie");
    assert!(auth.contains("HttpOnly"));
    assert!(auth.contains("Path=/"));
    assert!(auth.contains("Max-Age=86400"));
    assert!(set_cookie_for(&cookies, "user-role").unwrap().starts_with("user-role=instructor"));
    assert!(set_cookie_for(&cookies, "enrolled-c1").is_some());
    assert!(set_cookie_for(&cookies, "enrolled-c2").is_some());

    let body = read_json(response).await;
    assert_eq!(body["uid"], "u1");
    assert_eq!(body["primary_role"], "instructor");
    assert_eq!(body["is_instructor"], true);
    assert_eq!(body["is_admin"], false);
    assert_eq!(body["enrollments_mirrored"], 2);
    let permissions = body["permissions"].as_array().unwrap();
    assert!(permissions.contains(&serde_json::json!("courses:create")));
    assert!(!permissions.contains(&serde_json::json!("roles:manage")));
}

#[tokio::test]
async fn sign_in_rejects_missing_or_forged_tokens() {
    let app = app();

    let missing = app
        .router
        .clone()
        .oneshot(request("POST", "/api/v1/session").body(Body::empty()).unwrap())
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&missing).is_empty());
    assert_eq!(read_json(missing).await["error"]["code"], "UNAUTHORIZED");

    let forged = app
        .router
        .clone()
        .oneshot(authed("POST", "/api/v1/session", "not.a.token"))
        .await
        .expect("response");
    assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_out_clears_every_mirror_cookie() {
    let app = app();

    let response = app
        .router
        .clone()
        .oneshot(
            request("DELETE", "/api/v1/session")
                .header(
                    header::COOKIE,
                    "firebase-auth-token=t; user-role=student; enrolled-a=true; \
                     enrolled-b=true; enrolled-c=true",
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 5);
    for name in ["firebase-auth-token", "user-role", "enrolled-a", "enrolled-b", "enrolled-c"] {
        let removal = set_cookie_for(&cookies, name).expect("removal cookie");
        assert!(removal.contains("Max-Age=0"), "{removal}");
    }
}

#[tokio::test]
async fn claims_default_to_student() {
    let app = app();
    let token = id_token("u1", None, &[]);

    let response = app
        .router
        .clone()
        .oneshot(authed("GET", "/api/v1/me/claims", &token))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["primary_role"], "student");
    assert_eq!(body["roles"], serde_json::json!(["student"]));
    assert_eq!(body["is_student"], true);
    assert_eq!(body["permissions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn claims_follow_the_identity_store() {
    let app = app();
    let token = id_token("u1", None, &["student"]);

    let first = app
        .router
        .clone()
        .oneshot(authed("GET", "/api/v1/me/claims", &token))
        .await
        .expect("response");
    assert_eq!(read_json(first).await["is_admin"], false);

    app.backend.set_roles("u1", &["admin".into()]).await.unwrap();

    let second = app
        .router
        .clone()
        .oneshot(authed("GET", "/api/v1/me/claims", &token))
        .await
        .expect("response");
    let body = read_json(second).await;
    assert_eq!(body["is_admin"], true);
    assert_eq!(body["permissions"].as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn protected_endpoints_require_a_token() {
    let app = app();

    for (method, uri) in [
        ("GET", "/api/v1/me/claims"),
        ("GET", "/api/v1/me/enrollments"),
        ("POST", "/api/v1/courses/c1/enrollment"),
        ("GET", "/api/v1/admin/roles?uid=u1"),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(request(method, uri).body(Body::empty()).unwrap())
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn enrollment_toggles_a_single_flag() {
    let app = app();
    let token = id_token("u1", None, &["student"]);

    let created = app
        .router
        .clone()
        .oneshot(authed("POST", "/api/v1/courses/c1/enrollment", &token))
        .await
        .expect("response");
    assert_eq!(created.status(), StatusCode::CREATED);
    let cookies = set_cookies(&created);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("enrolled-c1=true"));

    let again = app
        .router
        .clone()
        .oneshot(authed("POST", "/api/v1/courses/c1/enrollment", &token))
        .await
        .expect("response");
    assert_eq!(again.status(), StatusCode::OK);

    let listed = app
        .router
        .clone()
        .oneshot(authed("GET", "/api/v1/me/enrollments", &token))
        .await
        .expect("response");
    assert_eq!(
        read_json(listed).await["course_ids"],
        serde_json::json!(["c1"])
    );

    let removed = app
        .router
        .clone()
        .oneshot(
            request("DELETE", "/api/v1/courses/c1/enrollment")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::COOKIE, "enrolled-c1=true; enrolled-c2=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);
    let cookies = set_cookies(&removed);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("enrolled-c1="));
    assert!(cookies[0].contains("Max-Age=0"));

    assert!(!app.backend.is_enrolled("u1", "c1").await.unwrap());
}

#[tokio::test]
async fn enrollment_status_reconciles_a_stale_flag() {
    let app = app();
    let token = id_token("u1", None, &[]);

    let response = app
        .router
        .clone()
        .oneshot(
            request("GET", "/api/v1/courses/c9/enrollment")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::COOKIE, "enrolled-c9=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(set_cookie_for(&cookies, "enrolled-c9").unwrap().contains("Max-Age=0"));
    assert_eq!(read_json(response).await["enrolled"], false);
}

#[tokio::test]
async fn malformed_course_ids_are_rejected() {
    let app = app();
    let token = id_token("u1", None, &[]);

    let response = app
        .router
        .clone()
        .oneshot(authed("POST", "/api/v1/courses/bad.id/enrollment", &token))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"]["code"], "INVALID_COURSE_ID");
}

#[tokio::test]
async fn sign_in_records_the_identity() {
    let app = app();
    let token = id_token("u7", Some("seven@example.com"), &[]);

    let response = app
        .router
        .clone()
        .oneshot(authed("POST", "/api/v1/session", &token))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        app.backend.find_uid_by_email("seven@example.com").await.unwrap(),
        Some("u7".to_string())
    );
}
