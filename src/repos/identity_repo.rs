/*
 * Responsibility
 * - identities テーブル向け SQLx 操作 (role claims の保存先)
 * - PgPool を受け取り IdentityStore を提供
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::authz::Role;
use crate::repos::IdentityStore;
use crate::repos::error::RepoResult;

#[derive(Debug, FromRow)]
pub struct IdentityRow {
    pub uid: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct PgIdentityRepo {
    pool: PgPool,
}

impl PgIdentityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, uid: &str) -> RepoResult<Option<IdentityRow>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT uid, email, roles
            FROM identities
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[async_trait]
impl IdentityStore for PgIdentityRepo {
    async fn ensure_identity(
        &self,
        uid: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await?;

        // an email belongs to one identity: a re-registered account takes it over
        if let Some(email) = email {
            sqlx::query(
                r#"
                UPDATE identities
                SET email = NULL, updated_at = now()
                WHERE lower(email) = lower($2) AND uid <> $1
                "#,
            )
            .bind(uid)
            .bind(email)
            .execute(&mut *tx)
            .await?;
        }

        // email is refreshed, roles are only seeded on first insert
        sqlx::query(
            r#"
            INSERT INTO identities (uid, email, roles)
            VALUES ($1, $2, $3)
            ON CONFLICT (uid) DO UPDATE
            SET email = COALESCE(EXCLUDED.email, identities.email)
            "#,
        )
        .bind(uid)
        .bind(email)
        .bind(roles)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn roles(&self, uid: &str) -> RepoResult<Option<Vec<String>>> {
        Ok(self.get(uid).await?.map(|row| row.roles))
    }

    async fn set_roles(&self, uid: &str, roles: &[String]) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE identities
            SET roles = $2, updated_at = now()
            WHERE uid = $1
            "#,
        )
        .bind(uid)
        .bind(roles)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_uid_by_email(&self, email: &str) -> RepoResult<Option<String>> {
        let uid = sqlx::query_scalar::<_, String>(
            r#"
            SELECT uid
            FROM identities
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(uid)
    }

    async fn any_admin(&self) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM identities WHERE $1 = ANY(roles)
            )
            "#,
        )
        .bind(Role::Admin.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
