#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use coursegate::app::build_router;
use coursegate::config::{AppEnv, Config};
use coursegate::repos::InMemoryBackend;
use coursegate::services::auth::{VerifierKey, build_verifier};
use coursegate::session::SessionMirror;
use coursegate::state::AppState;
use jsonwebtoken::{Algorithm, EncodingKey, Header};

pub const SECRET: &str = "integration-secret";
pub const ISSUER: &str = "https://issuer.test";
pub const AUDIENCE: &str = "coursegate";

pub struct TestApp {
    pub router: Router,
    pub backend: Arc<InMemoryBackend>,
}

pub fn config(admin_setup_enabled: bool) -> Config {
    Config {
        addr: "127.0.0.1:0".parse().expect("addr"),
        database_url: None,
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        auth_issuer: ISSUER.into(),
        auth_audience: AUDIENCE.into(),
        id_token_key: VerifierKey::HmacSecret(SECRET.into()),
        id_token_leeway_seconds: 0,
        cookie_secure: false,
        session_cookie_days: 1,
        enrollment_cookie_days: 30,
        admin_setup_enabled,
    }
}

pub fn app_with(config: Config) -> TestApp {
    let backend = Arc::new(InMemoryBackend::new());
    let state = AppState::new(
        backend.clone(),
        backend.clone(),
        build_verifier(&config).expect("verifier"),
        SessionMirror::new(config.cookie_policy()),
        config.admin_setup_enabled,
    );

    TestApp {
        router: build_router(state, &config),
        backend,
    }
}

pub fn app() -> TestApp {
    app_with(config(false))
}

/// HS256 ID token as the identity provider would issue it.
pub fn id_token(uid: &str, email: Option<&str>, roles: &[&str]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = serde_json::json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": uid,
        "iat": now,
        "exp": now + 3600,
        "email": email,
        "roles": roles,
    });

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("sign")
}

pub fn request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

pub fn authed(method: &str, uri: &str, token: &str) -> Request<Body> {
    request(method, uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request")
}

pub fn authed_json(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    request(method, uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn with_cookies(method: &str, uri: &str, cookies: &str) -> Request<Body> {
    let builder = request(method, uri);
    let builder = if cookies.is_empty() {
        builder
    } else {
        builder.header(header::COOKIE, cookies)
    };
    builder.body(Body::empty()).expect("request")
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("ascii").to_string())
        .collect()
}

pub fn set_cookie_for<'a>(cookies: &'a [String], name: &str) -> Option<&'a String> {
    let prefix = format!("{name}=");
    cookies.iter().find(|c| c.starts_with(&prefix))
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
}
