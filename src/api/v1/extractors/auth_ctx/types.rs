/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が ID token を検証し、identity store の role claims を解決して extensions に格納する
 *
 * Notes
 * - token の検証ロジックは services/auth 側の責務
 * - cookie (session mirror) はここでは一切見ない。API の認可は常にこの型から行う
 */

use crate::authz::Claims;
use crate::error::AppError;
use crate::services::auth::VerifiedIdentity;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `uid` は identity provider の subject (opaque string)
/// - `claims` は stored role claims から解決した permission 集合 (default role 適用済み)
/// - `token_fingerprint` はログ相関用。token そのものは保持しない
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub uid: String,
    pub claims: Claims,
    pub token_fingerprint: String,
}

impl AuthCtx {
    pub fn new(identity: VerifiedIdentity, token_fingerprint: String) -> Self {
        Self {
            claims: Claims::for_identity(&identity.roles),
            uid: identity.uid,
            token_fingerprint,
        }
    }

    /// Admin endpoints: 403 unless the verified claims carry the admin role.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.claims.is_admin() {
            Ok(())
        } else {
            tracing::warn!(
                uid = %self.uid,
                token = %self.token_fingerprint,
                "admin endpoint denied"
            );
            Err(AppError::Forbidden("admin role required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::Role;

    fn ctx(roles: &[&str]) -> AuthCtx {
        AuthCtx::new(
            VerifiedIdentity {
                uid: "u1".into(),
                email: None,
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
            "fp".into(),
        )
    }

    #[test]
    fn keeps_the_fingerprint_not_the_identity_email() {
        let ctx = AuthCtx::new(
            VerifiedIdentity {
                uid: "u1".into(),
                email: Some("u1@example.com".into()),
                roles: vec!["instructor".into()],
            },
            "fp-123".into(),
        );
        assert_eq!(ctx.token_fingerprint, "fp-123");
        assert_eq!(ctx.claims.primary_role(), Some(Role::Instructor));
        assert!(!format!("{ctx:?}").contains("u1@example.com"));
    }

    #[test]
    fn default_role_applies_to_bare_identities() {
        let ctx = ctx(&[]);
        assert_eq!(ctx.claims.primary_role(), Some(Role::Student));
        assert!(ctx.claims.is_student());
        assert!(ctx.require_admin().is_err());
    }

    #[test]
    fn admin_passes_admin_check() {
        let ctx = ctx(&["admin"]);
        assert!(ctx.require_admin().is_ok());
        assert!(ctx.claims.is_instructor());
    }
}
