/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer 不要: /health, /session
 * - Bearer 必須 (access middleware を route_layer で適用): /me, /courses/{course_id}/enrollment, /admin
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    admin::{add_role, get_roles, remove_role, set_role, setup},
    enrollment::{enroll, get_enrollment, unenroll},
    health::health,
    me::{get_claims, list_enrollments},
    session::{create_session, delete_session},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/session", post(create_session).delete(delete_session));

    let protected = Router::new()
        .route("/me/claims", get(get_claims))
        .route("/me/enrollments", get(list_enrollments))
        .route(
            "/courses/{course_id}/enrollment",
            get(get_enrollment).post(enroll).delete(unenroll),
        )
        .route(
            "/admin/roles",
            get(get_roles)
                .post(set_role)
                .put(add_role)
                .delete(remove_role),
        )
        .route("/admin/setup", post(setup));

    public
        .merge(middleware::auth::access::apply(protected, state))
        .fallback(not_found)
}

// keeps unknown API paths out of the page shell fallback
async fn not_found() -> AppError {
    AppError::not_found("route")
}
