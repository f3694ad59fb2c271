//! In-memory task store using DashMap

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tasklist_core::{Result, Task, TaskStore};

/// Process-local table, lost on restart
pub struct MemoryTaskStore {
    data: Arc<DashMap<String, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }
}

#[cfg(test)]
impl MemoryTaskStore {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn ensure_table(&self) -> Result<()> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        Ok(self.data.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.data.get(id).map(|entry| entry.value().clone()))
    }

    async fn put(&self, task: &Task) -> Result<()> {
        self.data.insert(task.id.clone(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.data.remove(id);
        Ok(())
    }
}
