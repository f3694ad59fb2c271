//! SQLite task store (embedded, no external service)

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;
use tasklist_core::{Result, StoreError, Task, TaskStore};

pub struct SqliteTaskStore {
    pool: Arc<SqlitePool>,
}

impl SqliteTaskStore {
    pub async fn open(database_path: &str) -> Result<Self> {
        if database_path == ":memory:" {
            return Self::in_memory().await;
        }

        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(StoreError::backend)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StoreError::backend)?;

        tracing::info!("SQLite connection established");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Private database that lives as long as this store
    pub async fn in_memory() -> Result<Self> {
        // Every connection to :memory: is a separate database, so keep exactly one alive
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(StoreError::backend)?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn ensure_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                content TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT '',
                complete INTEGER
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, content, created_at, complete FROM tasks
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as(
            r#"
            SELECT id, content, created_at, complete FROM tasks WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(row.map(|r| r.into()))
    }

    async fn put(&self, task: &Task) -> Result<()> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO tasks (id, content, created_at, complete)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&task.id)
        .bind(&task.content)
        .bind(&task.created_at)
        .bind(task.complete)
        .execute(&*self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM tasks WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(StoreError::backend)?;

        Ok(())
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    content: String,
    created_at: String,
    complete: Option<i64>,
}

impl From<TaskRow> for Task {
    fn from(r: TaskRow) -> Self {
        Task {
            id: r.id,
            content: r.content,
            created_at: r.created_at,
            complete: r.complete,
        }
    }
}
