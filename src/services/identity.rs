//! Verified token → identity as the backend knows it.

use crate::error::AppError;
use crate::repos::IdentityStore;
use crate::services::auth::VerifiedIdentity;

/// Load the stored role claims for a verified token.
///
/// The identity store is authoritative for roles. The token's own role claims only seed the
/// record the first time an identity is seen.
pub async fn load_principal(
    store: &dyn IdentityStore,
    verified: VerifiedIdentity,
) -> Result<VerifiedIdentity, AppError> {
    if let Some(roles) = store.roles(&verified.uid).await? {
        return Ok(VerifiedIdentity { roles, ..verified });
    }

    store
        .ensure_identity(&verified.uid, verified.email.as_deref(), &verified.roles)
        .await?;
    tracing::debug!(uid = %verified.uid, roles = ?verified.roles, "identity recorded");

    Ok(verified)
}

/// Like [`load_principal`], but always refreshes the stored email. Used on sign-in.
pub async fn record_sign_in(
    store: &dyn IdentityStore,
    verified: VerifiedIdentity,
) -> Result<VerifiedIdentity, AppError> {
    store
        .ensure_identity(&verified.uid, verified.email.as_deref(), &verified.roles)
        .await?;

    let roles = store.roles(&verified.uid).await?.unwrap_or_default();
    Ok(VerifiedIdentity { roles, ..verified })
}
