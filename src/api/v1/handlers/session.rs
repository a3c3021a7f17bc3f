/*
 * Responsibility
 * - POST /session: ID token を検証し、session mirror cookie を書き込む (sign-in)
 * - DELETE /session: session mirror cookie を全て消す (sign-out)。token 不要
 */
use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    api::v1::dto::claims::{ClaimsResponse, SessionResponse},
    error::AppError,
    middleware::auth::bearer_token,
    services::identity::record_sign_in,
    state::AppState,
};

pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let verified = state.verifier.verify_identity(token)?;
    let identity = record_sign_in(state.identities.as_ref(), verified).await?;

    let signed_in = state
        .mirror
        .sign_in(jar, token, &identity, state.enrollments.as_ref())
        .await;

    let body = SessionResponse {
        claims: ClaimsResponse::new(&identity.uid, &signed_in.claims),
        enrollments_mirrored: signed_in.enrollments_mirrored,
    };

    Ok((signed_in.jar, Json(body)))
}

pub async fn delete_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    (state.mirror.clear_session(jar), StatusCode::NO_CONTENT)
}
