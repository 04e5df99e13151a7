use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    repository::TaskRepository,
};

/// PostgreSQL-backed TaskRepository
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_by_id(&self, id: i64) -> TaskResult<Option<entity::Model>> {
        Ok(self.base.find_by_id(id).await?)
    }

    async fn find_all(&self) -> TaskResult<Vec<entity::Model>> {
        Ok(self.base.find_all().await?)
    }

    async fn save(&self, task: entity::ActiveModel) -> TaskResult<entity::Model> {
        let id = match task.id {
            ActiveValue::Set(id) | ActiveValue::Unchanged(id) => id,
            _ => {
                let model = self.base.insert(task).await?;
                tracing::info!(task_id = model.id, "Created task");
                return Ok(model);
            }
        };

        match self.base.update(task).await {
            Ok(model) => {
                tracing::info!(task_id = model.id, "Updated task");
                Ok(model)
            }
            // Row deleted between the caller's lookup and this update.
            Err(DbErr::RecordNotUpdated) => Err(TaskError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    async fn exists_by_id(&self, id: i64) -> TaskResult<bool> {
        Ok(self.base.exists_by_id(id).await?)
    }

    async fn delete_by_id(&self, id: i64) -> TaskResult<()> {
        let rows_affected = self.base.delete_by_id(id).await?;
        tracing::info!(task_id = id, rows_affected, "Deleted task");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::request_to_entity;
    use crate::models::TaskRequest;
    use chrono::Utc;
    use sea_orm::ActiveValue::Set;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, RuntimeErr};

    fn row(id: i64, title: &str) -> entity::Model {
        let now = Utc::now().into();
        entity::Model {
            id,
            title: title.to_string(),
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_absent_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert_eq!(repo.find_by_id(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_without_id_inserts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "A")]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let mut task = request_to_entity(TaskRequest::new("A"));
        let now = Utc::now().into();
        task.created_at = Set(now);
        task.updated_at = Set(now);

        let saved = repo.save(task).await.unwrap();
        assert_eq!(saved.id, 1);
        assert_eq!(saved.title, "A");
    }

    #[tokio::test]
    async fn test_save_with_id_updates() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "after")]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let saved = repo
            .save(entity::ActiveModel {
                id: Set(3),
                title: Set("after".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(saved.id, 3);
        assert_eq!(saved.title, "after");
    }

    #[tokio::test]
    async fn test_update_of_vanished_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let result = repo
            .save(entity::ActiveModel {
                id: Set(9),
                title: Set("gone".to_string()),
                ..Default::default()
            })
            .await;

        assert!(matches!(result, Err(TaskError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_find_all_and_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "a"), row(2, "b")]])
            .append_query_results([vec![row(2, "b")]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(repo.exists_by_id(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        repo.delete_by_id(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_db_errors_become_storage_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "connection reset".to_string(),
            ))])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let result = repo.find_all().await;
        assert!(matches!(result, Err(TaskError::Storage(msg)) if msg.contains("connection reset")));
    }
}
