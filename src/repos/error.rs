/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - backend の種類 (Postgres / in-memory / 外部サービス) に依存しない形で返す
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

pub type RepoResult<T> = Result<T, RepoError>;
