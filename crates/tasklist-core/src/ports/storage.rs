//! Storage trait for task persistence

use crate::Result;
use async_trait::async_trait;
use tasklist_types::Task;

/// Key-value table of tasks keyed by `id`.
///
/// Implementations do not retry and do not translate backend failures.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Make sure the backing table exists, creating it and waiting for it
    /// to become usable if it does not.
    async fn ensure_table(&self) -> Result<()>;

    /// Every stored task, in whatever order the store returns them.
    async fn list_all(&self) -> Result<Vec<Task>>;

    async fn get(&self, id: &str) -> Result<Option<Task>>;

    /// Full-record upsert keyed by `task.id`.
    async fn put(&self, task: &Task) -> Result<()>;

    /// Remove a task. Missing ids are not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
