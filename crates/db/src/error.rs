//! Typed error type for the db crate.

use domain::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    /// An optimistic-concurrency check matched no row.
    #[error("row version mismatch")]
    Conflict,

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<DbError> for RepositoryError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => RepositoryError::NotFound,
            DbError::Conflict => RepositoryError::Conflict,
            other => RepositoryError::storage(other),
        }
    }
}
