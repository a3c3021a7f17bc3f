/*
 * Responsibility
 * - /admin/roles: role claims の参照 / 置換 (POST) / 追加 (PUT) / 削除 (DELETE)
 * - /admin/setup: 最初の admin を 1 度だけ作る
 * - 認可は検証済み token の claims (AuthCtx) で行い、cookie は見ない
 */
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::v1::{
        dto::admin::{AdminSetupRequest, RoleChangeRequest, RolesQuery, RolesResponse},
        extractors::{AuthCtx, AuthCtxExtractor},
    },
    authz::Role,
    error::AppError,
    services::roles::{self, RoleChange},
    state::AppState,
};

pub async fn get_roles(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Query(query): Query<RolesQuery>,
) -> Result<Json<RolesResponse>, AppError> {
    ctx.require_admin()?;

    let roles = roles::get_roles(state.identities.as_ref(), &query.uid).await?;
    Ok(Json(RolesResponse {
        uid: query.uid,
        roles,
    }))
}

async fn apply_change(
    state: &AppState,
    ctx: &AuthCtx,
    req: RoleChangeRequest,
    make: fn(Role) -> RoleChange,
) -> Result<Json<RolesResponse>, AppError> {
    let change = make(req.validate()?);

    let roles = roles::change_roles(state.identities.as_ref(), &req.uid, change).await?;
    tracing::info!(
        by = %ctx.uid,
        token = %ctx.token_fingerprint,
        uid = %req.uid,
        change = ?change,
        "admin changed roles"
    );

    Ok(Json(RolesResponse {
        uid: req.uid,
        roles,
    }))
}

/// POST: the target ends up with exactly `[role]`.
pub async fn set_role(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<RoleChangeRequest>,
) -> Result<Json<RolesResponse>, AppError> {
    ctx.require_admin()?;
    apply_change(&state, &ctx, req, RoleChange::Replace).await
}

/// PUT: add `role`, keeping the others.
pub async fn add_role(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<RoleChangeRequest>,
) -> Result<Json<RolesResponse>, AppError> {
    ctx.require_admin()?;
    apply_change(&state, &ctx, req, RoleChange::Add).await
}

pub async fn remove_role(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<RoleChangeRequest>,
) -> Result<Json<RolesResponse>, AppError> {
    ctx.require_admin()?;
    apply_change(&state, &ctx, req, RoleChange::Remove).await
}

/// Make the identity with the given email an admin (roles become exactly `[admin]`).
///
/// Only while `ADMIN_SETUP_ENABLED` is on and nobody holds the admin role yet. Two concurrent
/// setups can both pass the check; both targets then end up admin.
pub async fn setup(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<AdminSetupRequest>,
) -> Result<Json<RolesResponse>, AppError> {
    let email = req.validate()?;

    if !state.admin_setup_enabled {
        return Err(AppError::conflict(
            "ADMIN_SETUP_DISABLED",
            "admin setup is not enabled",
        ));
    }
    if state.identities.any_admin().await? {
        return Err(AppError::conflict(
            "ADMIN_ALREADY_EXISTS",
            "an admin already exists",
        ));
    }

    let uid = state
        .identities
        .find_uid_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    let roles = roles::change_roles(
        state.identities.as_ref(),
        &uid,
        RoleChange::Replace(Role::Admin),
    )
    .await?;
    tracing::warn!(
        by = %ctx.uid,
        token = %ctx.token_fingerprint,
        uid = %uid,
        "initial admin granted"
    );

    Ok(Json(RolesResponse { uid, roles }))
}
