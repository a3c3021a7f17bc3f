//! ID token (Bearer) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <id token>` を受け取り、署名 + iss/aud/exp を検証する
//! - role claims は identity store から解決する (token の role は初回登録時の seed のみ)
//! - cookie (session mirror) は見ない。API は常に検証済み token で認可する

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::token_fingerprint;
use crate::services::identity::load_principal;
use crate::state::AppState;

/// 認証が必要な `/api/v1/*` の範囲に掛ける。
///
/// 例：
/// ```ignore
/// let protected = middleware::auth::access::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

/// `Authorization: Bearer <token>` の token 部分。空文字は None。
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or(AppError::Unauthorized)?;
    let fingerprint = token_fingerprint(token);

    let verified = match state.verifier.verify_identity(token) {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(error = %err, token = %fingerprint, "id token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    let principal = load_principal(state.identities.as_ref(), verified).await?;
    let auth_ctx = AuthCtx::new(principal, fingerprint);

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
