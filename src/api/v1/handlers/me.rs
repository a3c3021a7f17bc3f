/*
 * Responsibility
 * - GET /me/claims: UI の permission guard 用に解決済み claims を返す
 * - GET /me/enrollments: backend 上の enrollment 一覧 (authoritative)
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::{claims::ClaimsResponse, enrollment::EnrollmentsResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn get_claims(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<ClaimsResponse> {
    Json(ClaimsResponse::new(&ctx.uid, &ctx.claims))
}

pub async fn list_enrollments(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<EnrollmentsResponse>, AppError> {
    let course_ids = state.enrollments.list_course_ids(&ctx.uid).await?;
    Ok(Json(EnrollmentsResponse { course_ids }))
}
