/*
 * Responsibility
 * - enrollments CRUD
 * - (user_id, course_id) の複合 PK 前提で enroll/unenroll は冪等
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::EnrollmentStore;
use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrollmentRow {
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct PgEnrollmentRepo {
    pool: PgPool,
}

impl PgEnrollmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, uid: &str) -> RepoResult<Vec<EnrollmentRow>> {
        let rows = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT user_id, course_id, enrolled_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY enrolled_at DESC
            "#,
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl EnrollmentStore for PgEnrollmentRepo {
    async fn list_course_ids(&self, uid: &str) -> RepoResult<Vec<String>> {
        let rows = self.list(uid).await?;
        Ok(rows.into_iter().map(|r| r.course_id).collect())
    }

    async fn enroll(&self, uid: &str, course_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, course_id) DO NOTHING
            "#,
        )
        .bind(uid)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn unenroll(&self, uid: &str, course_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            "#,
        )
        .bind(uid)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_enrolled(&self, uid: &str, course_id: &str) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM enrollments WHERE user_id = $1 AND course_id = $2
            )
            "#,
        )
        .bind(uid)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
