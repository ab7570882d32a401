//! `InMemoryRepository` — a process-local [`Repository`] implementation.
//!
//! Used as the test double for services and handlers: every write is
//! recorded so tests can assert on exactly which calls were made.

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{Entity, Repository, RepositoryError};

/// A write issued against an [`InMemoryRepository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteCall {
    Add(Uuid),
    Update(Uuid),
    Delete(Uuid),
}

/// Insertion-ordered store guarded by a single async mutex.
#[derive(Debug)]
pub struct InMemoryRepository<E> {
    items: Mutex<Vec<E>>,
    writes: Mutex<Vec<WriteCall>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Pre-populate the store without recording any writes.
    pub fn with_items(items: Vec<E>) -> Self {
        Self {
            items: Mutex::new(items),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// All writes seen so far (in call order).
    pub async fn writes(&self) -> Vec<WriteCall> {
        self.writes.lock().await.clone()
    }

    pub async fn update_count(&self) -> usize {
        self.writes
            .lock()
            .await
            .iter()
            .filter(|w| matches!(w, WriteCall::Update(_)))
            .count()
    }

    async fn record(&self, call: WriteCall) {
        self.writes.lock().await.push(call);
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, RepositoryError> {
        Ok(self.items.lock().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<E>, RepositoryError> {
        Ok(self.items.lock().await.iter().find(|e| e.id() == id).cloned())
    }

    async fn add(&self, entity: E) -> Result<E, RepositoryError> {
        self.record(WriteCall::Add(entity.id())).await;
        self.items.lock().await.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, mut entity: E) -> Result<(), RepositoryError> {
        self.record(WriteCall::Update(entity.id())).await;

        let mut items = self.items.lock().await;
        let slot = items
            .iter_mut()
            .find(|e| e.id() == entity.id())
            .ok_or(RepositoryError::NotFound)?;

        if let Some(expected) = slot.row_version() {
            if entity.row_version() != Some(expected) {
                return Err(RepositoryError::Conflict);
            }
            entity.set_row_version(expected + 1);
        }

        *slot = entity;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.record(WriteCall::Delete(id)).await;

        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|e| e.id() != id);
        if items.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Preference;

    fn preference(name: &str) -> Preference {
        Preference { id: Uuid::new_v4(), name: name.into() }
    }

    #[tokio::test]
    async fn add_then_get_preserves_insertion_order() {
        let repo: InMemoryRepository<Preference> = InMemoryRepository::new();
        let a = repo.add(preference("Театр")).await.unwrap();
        let b = repo.add(preference("Семья")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all, vec![a.clone(), b]);
        assert_eq!(repo.get_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_entity_is_not_found() {
        let repo: InMemoryRepository<Preference> = InMemoryRepository::new();
        let ghost = preference("Дети");

        assert!(matches!(repo.update(ghost.clone()).await, Err(RepositoryError::NotFound)));
        assert!(matches!(repo.delete(ghost.id).await, Err(RepositoryError::NotFound)));
        assert_eq!(
            repo.writes().await,
            vec![WriteCall::Update(ghost.id), WriteCall::Delete(ghost.id)]
        );
    }

    #[tokio::test]
    async fn entities_without_version_are_last_write_wins() {
        let original = preference("Театр");
        let repo = InMemoryRepository::with_items(vec![original.clone()]);

        repo.update(Preference { name: "Кино".into(), ..original.clone() }).await.unwrap();
        repo.update(Preference { name: "Опера".into(), ..original.clone() }).await.unwrap();

        let stored = repo.get_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Опера");
        assert_eq!(repo.update_count().await, 2);
    }
}
