//! Task storage.
//!
//! Handlers only talk to [`TaskStore`]; every mutating call commits on its own
//! and reports commit failures through its `Result`.

mod memory;
mod postgres;

pub use memory::MemoryTaskStore;
pub use postgres::PgTaskStore;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::tasks::{NewTask, Task, TaskStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Search criteria understood by every store.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskFilter {
    /// Case-sensitive substring match on the title.
    TitleContains(String),
    /// Tasks whose date falls on this calendar day.
    OnDay(NaiveDate),
    Status(TaskStatus),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::TitleContains(needle) => task.title.contains(needle.as_str()),
            TaskFilter::OnDay(day) => task.day() == *day,
            TaskFilter::Status(status) => task.status == *status,
        }
    }
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Cheap reachability check for health probes.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, StoreError>;

    /// Every task, ordered by id.
    async fn all(&self) -> Result<Vec<Task>, StoreError>;

    async fn filter(&self, filter: &TaskFilter) -> Result<Vec<Task>, StoreError>;

    /// Persists a new task and returns it with its assigned id.
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Overwrites the stored record with the same id. `None` if it no longer exists.
    async fn update(&self, task: Task) -> Result<Option<Task>, StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}
