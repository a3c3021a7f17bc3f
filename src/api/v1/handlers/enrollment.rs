/*
 * Responsibility
 * - /courses/{course_id}/enrollment の参照 / enroll / unenroll
 * - backend を更新した上で、`enrolled-{course_id}` cookie を 1 つだけ増減させる
 * - GET は backend の結果で cookie を合わせ直す (cookie は hint にすぎない)
 */
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    api::v1::{
        dto::enrollment::EnrollmentStatusResponse,
        extractors::{AuthCtxExtractor, CourseId},
    },
    error::AppError,
    state::AppState,
};

pub async fn get_enrollment(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    course: CourseId,
    jar: CookieJar,
) -> Result<(CookieJar, Json<EnrollmentStatusResponse>), AppError> {
    let enrolled = state
        .enrollments
        .is_enrolled(&ctx.uid, course.as_str())
        .await?;

    let jar = if enrolled {
        state.mirror.mark_enrolled(jar, course.as_str())
    } else {
        state.mirror.clear_enrolled(jar, course.as_str())
    };

    Ok((
        jar,
        Json(EnrollmentStatusResponse {
            course_id: course.0,
            enrolled,
        }),
    ))
}

pub async fn enroll(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    course: CourseId,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<EnrollmentStatusResponse>), AppError> {
    let created = state.enrollments.enroll(&ctx.uid, course.as_str()).await?;
    if created {
        tracing::info!(uid = %ctx.uid, course_id = %course.as_str(), "enrolled");
    }

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let jar = state.mirror.mark_enrolled(jar, course.as_str());

    Ok((
        status,
        jar,
        Json(EnrollmentStatusResponse {
            course_id: course.0,
            enrolled: true,
        }),
    ))
}

pub async fn unenroll(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    course: CourseId,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    let removed = state
        .enrollments
        .unenroll(&ctx.uid, course.as_str())
        .await?;
    if removed {
        tracing::info!(uid = %ctx.uid, course_id = %course.as_str(), "unenrolled");
    }

    Ok((
        state.mirror.clear_enrolled(jar, course.as_str()),
        StatusCode::NO_CONTENT,
    ))
}
