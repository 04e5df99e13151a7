use async_trait::async_trait;
use chrono::{DateTime, Utc};
use observability::{Outcome, TaskMetrics, TaskOperation};
use sea_orm::ActiveValue::Set;
use sea_orm::IntoActiveModel;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::mapper::{entity_to_wire, request_to_entity};
use crate::models::{Task, TaskRequest};
use crate::repository::TaskRepository;

/// Task operations exposed to the HTTP layer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn create(&self, request: TaskRequest) -> TaskResult<Task>;

    async fn get_by_id(&self, id: i64) -> TaskResult<Task>;

    async fn list_all(&self) -> TaskResult<Vec<Task>>;

    /// Replace title, description and completion of an existing task
    async fn update(&self, id: i64, request: TaskRequest) -> TaskResult<Task>;

    async fn delete(&self, id: i64) -> TaskResult<()>;
}

/// Service layer for Task business logic
#[derive(Clone)]
pub struct TaskServiceImpl<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> TaskServiceImpl<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    fn validate(request: &TaskRequest) -> TaskResult<()> {
        Ok(request.validate()?)
    }

    async fn create_task(&self, request: TaskRequest) -> TaskResult<Task> {
        Self::validate(&request)?;

        let now = Utc::now();
        let mut task = request_to_entity(request);
        task.created_at = Set(now.into());
        task.updated_at = Set(now.into());

        let saved = self.repository.save(task).await?;
        Ok(entity_to_wire(saved))
    }

    async fn find_task(&self, id: i64) -> TaskResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .map(entity_to_wire)
            .ok_or(TaskError::NotFound(id))
    }

    async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.repository.find_all().await?;
        Ok(tasks.into_iter().map(entity_to_wire).collect())
    }

    async fn update_task(&self, id: i64, request: TaskRequest) -> TaskResult<Task> {
        Self::validate(&request)?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        // Clock skew must not put updated_at before created_at.
        let created_at: DateTime<Utc> = existing.created_at.into();
        let now = Utc::now().max(created_at);

        let mut task = existing.into_active_model();
        task.title = Set(request.title.unwrap_or_default());
        task.description = Set(request.description);
        task.completed = Set(request.completed.unwrap_or(false));
        task.updated_at = Set(now.into());

        let saved = self.repository.save(task).await?;
        Ok(entity_to_wire(saved))
    }

    async fn delete_task(&self, id: i64) -> TaskResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(TaskError::NotFound(id));
        }

        self.repository.delete_by_id(id).await
    }
}

fn record<T>(operation: TaskOperation, started: Instant, result: &TaskResult<T>) {
    let outcome = match result {
        Ok(_) => Outcome::Success,
        Err(TaskError::NotFound(_)) => Outcome::NotFound,
        Err(TaskError::Validation(_)) => Outcome::Invalid,
        Err(TaskError::Storage(_)) => Outcome::Error,
    };
    TaskMetrics::record(operation, outcome, started.elapsed());
}

#[async_trait]
impl<R: TaskRepository> TaskService for TaskServiceImpl<R> {
    #[instrument(skip(self, request), fields(task_title = ?request.title))]
    async fn create(&self, request: TaskRequest) -> TaskResult<Task> {
        let started = Instant::now();
        let result = self.create_task(request).await;
        record(TaskOperation::Create, started, &result);
        result
    }

    #[instrument(skip(self), fields(task_id = id))]
    async fn get_by_id(&self, id: i64) -> TaskResult<Task> {
        let started = Instant::now();
        let result = self.find_task(id).await;
        record(TaskOperation::Get, started, &result);
        result
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let started = Instant::now();
        let result = self.list_tasks().await;
        record(TaskOperation::List, started, &result);
        result
    }

    #[instrument(skip(self, request), fields(task_id = id))]
    async fn update(&self, id: i64, request: TaskRequest) -> TaskResult<Task> {
        let started = Instant::now();
        let result = self.update_task(id, request).await;
        record(TaskOperation::Update, started, &result);
        result
    }

    #[instrument(skip(self), fields(task_id = id))]
    async fn delete(&self, id: i64) -> TaskResult<()> {
        let started = Instant::now();
        let result = self.delete_task(id).await;
        record(TaskOperation::Delete, started, &result);
        result
    }
}
