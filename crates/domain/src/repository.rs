//! The `Repository` trait — the persistence contract every store must fulfil.

use async_trait::async_trait;
use uuid::Uuid;

use crate::RepositoryError;

/// Anything a [`Repository`] can store.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// Optimistic concurrency token.  `None` means last write wins.
    fn row_version(&self) -> Option<i64> {
        None
    }

    fn set_row_version(&mut self, _version: i64) {}
}

/// Narrow CRUD interface over one entity type.
///
/// Handlers and services only ever see `Arc<dyn Repository<E>>`, so the
/// Postgres store and the in-memory store are interchangeable.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Every stored entity, in storage order.
    async fn get_all(&self) -> Result<Vec<E>, RepositoryError>;

    /// `Ok(None)` when no entity has this id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError>;

    async fn add(&self, entity: E) -> Result<E, RepositoryError>;

    /// Persist the whole entity back.
    ///
    /// Fails with `NotFound` if it was never added and with `Conflict` if
    /// its `row_version` no longer matches the stored one.
    async fn update(&self, entity: E) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
