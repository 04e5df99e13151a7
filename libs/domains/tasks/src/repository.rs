use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::entity;
use crate::error::{TaskError, TaskResult};

/// Repository trait for Task persistence
///
/// Absence is reported as `None`/`false`, never as an error. Storage
/// failures surface as [`TaskError::Storage`]; updating a row that no longer
/// exists is [`TaskError::NotFound`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get a task by ID
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<entity::Model>>;

    /// All tasks, ordered by ascending ID
    async fn find_all(&self) -> TaskResult<Vec<entity::Model>>;

    /// Insert when `id` is unset, otherwise update the row with that ID
    async fn save(&self, task: entity::ActiveModel) -> TaskResult<entity::Model>;

    async fn exists_by_id(&self, id: i64) -> TaskResult<bool>;

    /// Delete a task by ID. Callers check existence first.
    async fn delete_by_id(&self, id: i64) -> TaskResult<()>;
}

/// In-memory implementation of TaskRepository (for development/testing)
///
/// IDs come from a counter that only moves forward, so a deleted ID is
/// never handed out again.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<BTreeMap<i64, entity::Model>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

/// Overlays the set fields of `task` onto `base`.
fn merge(mut task: entity::ActiveModel, base: entity::Model) -> entity::Model {
    entity::Model {
        id: base.id,
        title: task.title.take().unwrap_or(base.title),
        description: task.description.take().unwrap_or(base.description),
        completed: task.completed.take().unwrap_or(base.completed),
        created_at: task.created_at.take().unwrap_or(base.created_at),
        updated_at: task.updated_at.take().unwrap_or(base.updated_at),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<entity::Model>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn find_all(&self) -> TaskResult<Vec<entity::Model>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }

    async fn save(&self, mut task: entity::ActiveModel) -> TaskResult<entity::Model> {
        let mut tasks = self.tasks.write().await;

        let saved = match task.id.take() {
            None => {
                let now = Utc::now().into();
                let base = entity::Model {
                    id: self.next_id.fetch_add(1, Ordering::SeqCst),
                    title: String::new(),
                    description: None,
                    completed: false,
                    created_at: now,
                    updated_at: now,
                };
                let model = merge(task, base);
                tracing::info!(task_id = model.id, "Created task");
                model
            }
            Some(id) => {
                let existing = tasks.get(&id).cloned().ok_or(TaskError::NotFound(id))?;
                let model = merge(task, existing);
                tracing::info!(task_id = id, "Updated task");
                model
            }
        };

        tasks.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn exists_by_id(&self, id: i64) -> TaskResult<bool> {
        let tasks = self.tasks.read().await;
        Ok(tasks.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<()> {
        let mut tasks = self.tasks.write().await;

        if tasks.remove(&id).is_some() {
            tracing::info!(task_id = id, "Deleted task");
        }
        Ok(())
    }
}
