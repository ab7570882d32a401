//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by any [`crate::Repository`] implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    /// The entity was modified by someone else since it was loaded.
    #[error("entity was modified concurrently")]
    Conflict,

    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl RepositoryError {
    pub fn storage(err: impl Into<BoxError>) -> Self {
        Self::Storage(err.into())
    }
}

/// Errors produced by [`crate::PartnerLimitService`].
///
/// The first four variants are business-rule rejections; callers map them
/// to distinct outcomes.  `Repository` is a fatal persistence failure.
#[derive(Debug, Error)]
pub enum PartnerLimitError {
    #[error("partner {0} not found")]
    NotFound(Uuid),

    #[error("limit {0} not found")]
    LimitNotFound(Uuid),

    #[error("partner is inactive")]
    InvalidOperation,

    #[error("limit must be greater than zero")]
    InvalidArgument,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
