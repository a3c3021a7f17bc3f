/*
 * Responsibility
 * - page navigation の受け口 (page shell)。実際の画面は UI layer が描画する
 * - route gate を通過した navigation だけがここに届く
 * - /access-denied だけはサーバー側で描画する
 */
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};

use crate::gate::ACCESS_DENIED_PATH;
use crate::state::AppState;

const SHELL: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Courses</title>
<script type="module" src="/static/app.js"></script>
</head>
<body><div id="root"></div></body>
</html>
"#;

const ACCESS_DENIED: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Access denied</title>
</head>
<body>
<h1>Access denied</h1>
<p>Your account does not have permission to view this page.</p>
<p><a href="/dashboard">Back to dashboard</a></p>
</body>
</html>
"#;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(ACCESS_DENIED_PATH, get(access_denied))
        .fallback(get(shell))
}

async fn shell() -> Html<&'static str> {
    Html(SHELL)
}

async fn access_denied() -> impl IntoResponse {
    (StatusCode::FORBIDDEN, Html(ACCESS_DENIED))
}
