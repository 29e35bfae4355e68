use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TaskFilter, TaskStore};
use crate::tasks::{NewTask, Task};

/// Process-local store used when no database is configured.
#[derive(Debug)]
pub struct MemoryTaskStore {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    next_id: i32,
    tasks: BTreeMap<i32, Task>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 1,
                tasks: BTreeMap::new(),
            }),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, StoreError> {
        Ok(self.inner.read().await.tasks.get(&id).cloned())
    }

    async fn all(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.inner.read().await.tasks.values().cloned().collect())
    }

    async fn filter(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect())
    }

    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable("task id space exhausted".to_string()))?;

        let task = task.with_id(id);
        inner.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError> {
        let mut inner = self.inner.write().await;

        match inner.tasks.get_mut(&task.id) {
            Some(existing) => {
                *existing = task.clone();
                Ok(Some(task))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.tasks.remove(&id).is_some())
    }
}
