//! Task management service

use std::sync::Arc;
use tasklist_core::{Result, Task, TaskStore};
use tracing::{debug, info};

pub struct TaskManager {
    store: Arc<dyn TaskStore>,
}

impl TaskManager {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// All tasks in the order the store returns them
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.store.list_all().await
    }

    /// All tasks, most recently created first
    pub async fn list_newest_first(&self) -> Result<Vec<Task>> {
        let mut tasks = self.store.list_all().await?;
        tasks.sort_by(Task::newest_first);
        Ok(tasks)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Task>> {
        debug!("Fetching task {}", id);
        self.store.get(id).await
    }

    pub async fn create(&self, content: &str, complete: Option<i64>) -> Result<Task> {
        let mut task = Task::new(content);
        task.complete = complete;

        self.store.put(&task).await?;
        info!("Created task {}", task.id);

        Ok(task)
    }

    /// Overwrite an existing task with new content, keeping its id and creation time.
    ///
    /// Returns `None` without writing anything when `id` is unknown.
    pub async fn update_content(&self, id: &str, content: &str) -> Result<Option<Task>> {
        let Some(existing) = self.store.get(id).await? else {
            debug!("Update of unknown task {}", id);
            return Ok(None);
        };

        let updated = existing.revised(content);
        self.store.put(&updated).await?;
        info!("Updated task {}", id);

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id).await?;
        info!("Deleted task {}", id);
        Ok(())
    }
}
