use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;

use models::todo::{Priority, Todo, TodoCreate, TodoUpdate};

use crate::errors::ServiceError;

/// In-memory to-do collection guarded by a single lock.
///
/// Records live in an ordered `Vec` so listing preserves insertion order.
/// All reads and writes go through the one `RwLock`; each operation is a
/// single pass under the lock, so concurrent requests cannot race on id
/// assignment or removal. Nothing is persisted; process exit discards all
/// records.
#[derive(Clone)]
pub struct TodoStore {
    inner: Arc<RwLock<Vec<Todo>>>,
}

impl TodoStore {
    /// Create an empty store.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { inner: Arc::new(RwLock::new(Vec::new())) })
    }

    /// Create a store pre-populated with `count` synthetic records,
    /// ids `0..count`, each with a random priority.
    pub fn seeded(count: usize) -> Arc<Self> {
        let mut rng = rand::thread_rng();
        let items = (0..count)
            .map(|i| Todo {
                todo_id: i as i64,
                name: format!("todo{}", i),
                description: format!("description{}", i),
                priority: match rng.gen_range(1..=3u8) {
                    1 => Priority::Low,
                    2 => Priority::Medium,
                    _ => Priority::High,
                },
            })
            .collect();
        Arc::new(Self { inner: Arc::new(RwLock::new(items)) })
    }

    /// List records in insertion order; with `first_n` set, only the first
    /// `min(first_n, size)` of them. Negative `first_n` is rejected.
    pub async fn list(&self, first_n: Option<i64>) -> Result<Vec<Todo>, ServiceError> {
        let items = self.inner.read().await;
        match first_n {
            None => Ok(items.clone()),
            Some(n) if n < 0 => Err(ServiceError::InvalidArgument(
                "first_n must be a positive number".into(),
            )),
            Some(n) => Ok(items.iter().take(n as usize).cloned().collect()),
        }
    }

    /// Get a record by id.
    pub async fn get(&self, id: i64) -> Option<Todo> {
        let items = self.inner.read().await;
        items.iter().find(|t| t.todo_id == id).cloned()
    }

    /// Validate and append a new record. The id is one greater than the
    /// current maximum, or 0 when the collection is empty.
    pub async fn create(&self, input: TodoCreate) -> Result<Todo, ServiceError> {
        input.validate()?;
        let mut items = self.inner.write().await;
        let new_id = items.iter().map(|t| t.todo_id).max().unwrap_or(-1) + 1;
        let todo = Todo {
            todo_id: new_id,
            name: input.name,
            description: input.description,
            priority: input.priority,
        };
        items.push(todo.clone());
        Ok(todo)
    }

    /// Apply a partial update to the record with `id`. Only fields present
    /// in the patch overwrite the stored values, so a sparse patch never
    /// erases data.
    pub async fn update(&self, id: i64, patch: TodoUpdate) -> Result<Todo, ServiceError> {
        patch.validate()?;
        let mut items = self.inner.write().await;
        let existing = items
            .iter_mut()
            .find(|t| t.todo_id == id)
            .ok_or_else(|| ServiceError::not_found("todo"))?;
        if let Some(name) = patch.name {
            existing.name = name;
        }
        if let Some(description) = patch.description {
            existing.description = description;
        }
        if let Some(priority) = patch.priority {
            existing.priority = priority;
        }
        Ok(existing.clone())
    }

    /// Remove the record with `id` by position, preserving the order of the
    /// remaining records. Returns the removed record's final state.
    pub async fn delete(&self, id: i64) -> Option<Todo> {
        let mut items = self.inner.write().await;
        let index = items.iter().position(|t| t.todo_id == id)?;
        Some(items.remove(index))
    }

    /// Current number of records.
    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, description: &str, priority: Priority) -> TodoCreate {
        TodoCreate { name: name.into(), description: description.into(), priority }
    }

    #[tokio::test]
    async fn seeded_store_has_sequential_ids_in_order() {
        let store = TodoStore::seeded(10);
        let all = store.list(None).await.expect("list ok");
        assert_eq!(all.len(), 10);
        let ids: Vec<i64> = all.iter().map(|t| t.todo_id).collect();
        assert_eq!(ids, (0..10).collect::<Vec<i64>>());
        assert_eq!(all[3].name, "todo3");
        assert_eq!(all[3].description, "description3");
    }

    #[tokio::test]
    async fn list_first_n_takes_a_prefix() {
        let store = TodoStore::seeded(10);

        let first3 = store.list(Some(3)).await.expect("list ok");
        assert_eq!(first3.iter().map(|t| t.todo_id).collect::<Vec<_>>(), vec![0, 1, 2]);

        assert!(store.list(Some(0)).await.expect("list ok").is_empty());
        // asking for more than exists returns everything
        assert_eq!(store.list(Some(100)).await.expect("list ok").len(), 10);
    }

    #[tokio::test]
    async fn list_rejects_negative_first_n() {
        let store = TodoStore::seeded(10);
        let err = store.list(Some(-1)).await.expect_err("must fail");
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
        // no mutation happened
        assert_eq!(store.count().await, 10);
    }

    #[tokio::test]
    async fn create_assigns_max_id_plus_one() {
        let store = TodoStore::new();
        let first = store
            .create(input("Buy milk", "2% milk, 1 gal", Priority::Medium))
            .await
            .expect("create ok");
        assert_eq!(first.todo_id, 0);
        assert_eq!(first.priority, Priority::Medium);

        let second = store
            .create(input("Walk dog", "around the block", Priority::Low))
            .await
            .expect("create ok");
        assert_eq!(second.todo_id, 1);

        // removing a middle record does not disturb the id sequence
        store.delete(0).await.expect("delete ok");
        let third = store
            .create(input("Water plants", "kitchen and balcony", Priority::High))
            .await
            .expect("create ok");
        assert_eq!(third.todo_id, 2);
    }

    #[tokio::test]
    async fn create_on_seeded_store_continues_after_seed_ids() {
        let store = TodoStore::seeded(10);
        let created = store
            .create(input("Buy milk", "2% milk, 1 gal", Priority::Medium))
            .await
            .expect("create ok");
        assert_eq!(created.todo_id, 10);

        // round-trip: the stored record equals the returned one
        let fetched = store.get(10).await.expect("found");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields_without_mutation() {
        let store = TodoStore::seeded(10);

        let err = store
            .create(input("ab", "2% milk, 1 gal", Priority::Low))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ServiceError::Model(_)));

        let err = store
            .create(input("Buy milk", "1234", Priority::Low))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ServiceError::Model(_)));

        assert_eq!(store.count().await, 10);
    }

    #[tokio::test]
    async fn update_changes_exactly_the_supplied_fields() {
        let store = TodoStore::seeded(10);

        let patch = TodoUpdate { name: None, description: None, priority: Some(Priority::High) };
        let updated = store.update(5, patch).await.expect("update ok");
        assert_eq!(updated.todo_id, 5);
        assert_eq!(updated.priority, Priority::High);
        assert_eq!(updated.name, "todo5");
        assert_eq!(updated.description, "description5");

        let patch = TodoUpdate {
            name: Some("renamed".into()),
            description: None,
            priority: None,
        };
        let updated = store.update(5, patch).await.expect("update ok");
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.priority, Priority::High);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = TodoStore::seeded(10);
        let patch = TodoUpdate { name: None, description: None, priority: Some(Priority::High) };
        let err = store.update(99, patch).await.expect_err("must fail");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_invalid_patch_fields() {
        let store = TodoStore::seeded(10);
        let patch = TodoUpdate { name: Some("ab".into()), description: None, priority: None };
        let err = store.update(5, patch).await.expect_err("must fail");
        assert!(matches!(err, ServiceError::Model(_)));
        // the stored record is untouched
        assert_eq!(store.get(5).await.expect("found").name, "todo5");
    }

    #[tokio::test]
    async fn delete_returns_record_and_preserves_order() {
        let store = TodoStore::seeded(10);

        let removed = store.delete(3).await.expect("delete ok");
        assert_eq!(removed.todo_id, 3);
        assert_eq!(store.count().await, 9);
        assert!(store.get(3).await.is_none());

        let ids: Vec<i64> = store
            .list(None)
            .await
            .expect("list ok")
            .iter()
            .map(|t| t.todo_id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);

        assert!(store.delete(3).await.is_none());
    }
}
