//! Generic CRUD over a SeaORM entity.
//!
//! Domain repositories wrap a [`BaseRepository`] and add their own error
//! mapping and logging on top.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    Iterable, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder,
};
use std::marker::PhantomData;

/// Primary key value type of entity `E`.
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// CRUD helpers shared by every SeaORM-backed repository.
///
/// # Example
/// ```ignore
/// let base = BaseRepository::<task::Entity>::new(db);
/// let task = base.find_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BaseRepository<E: EntityTrait> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn find_by_id(&self, id: PrimaryKeyOf<E>) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    /// All rows, ordered by primary key ascending.
    pub async fn find_all(&self) -> Result<Vec<E::Model>, DbErr> {
        let mut query = E::find();
        for key in E::PrimaryKey::iter() {
            query = query.order_by_asc(key.into_column());
        }
        query.all(&self.db).await
    }

    pub async fn exists_by_id(&self, id: PrimaryKeyOf<E>) -> Result<bool, DbErr> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Inserts `model` and returns the stored row, including generated columns.
    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    /// Updates the row matching `model`'s primary key.
    ///
    /// Fails with `DbErr::RecordNotUpdated` when no row matches.
    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }

    /// Returns the number of rows removed.
    pub async fn delete_by_id(&self, id: PrimaryKeyOf<E>) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveValue::Set, DatabaseBackend, MockDatabase, MockExecResult, Transaction};

    mod note {
        use sea_orm::entity::prelude::*;

        #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
        #[sea_orm(table_name = "notes")]
        pub struct Model {
            #[sea_orm(primary_key)]
            pub id: i64,
            pub body: String,
        }

        #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
        pub enum Relation {}

        impl ActiveModelBehavior for ActiveModel {}
    }

    fn row(id: i64, body: &str) -> note::Model {
        note::Model {
            id,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "first")]])
            .append_query_results([Vec::<note::Model>::new()])
            .into_connection();
        let repo = BaseRepository::<note::Entity>::new(db);

        assert_eq!(repo.find_by_id(1).await.unwrap(), Some(row(1, "first")));
        assert_eq!(repo.find_by_id(2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_orders_by_primary_key() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "a"), row(2, "b")]])
            .into_connection();
        let repo = BaseRepository::<note::Entity>::new(db);

        let rows = repo.find_all().await.unwrap();
        assert_eq!(rows.len(), 2);

        let log = repo.db().clone().into_transaction_log();
        assert_eq!(
            log,
            vec![Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                r#"SELECT "notes"."id", "notes"."body" FROM "notes" ORDER BY "notes"."id" ASC"#,
                []
            )]
        );
    }

    #[tokio::test]
    async fn test_exists_by_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(5, "x")]])
            .append_query_results([Vec::<note::Model>::new()])
            .into_connection();
        let repo = BaseRepository::<note::Entity>::new(db);

        assert!(repo.exists_by_id(5).await.unwrap());
        assert!(!repo.exists_by_id(6).await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_returns_generated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(10, "new")]])
            .into_connection();
        let repo = BaseRepository::<note::Entity>::new(db);

        let inserted = repo
            .insert(note::ActiveModel {
                body: Set("new".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(inserted, row(10, "new"));
    }

    #[tokio::test]
    async fn test_update_returns_updated_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(3, "changed")]])
            .into_connection();
        let repo = BaseRepository::<note::Entity>::new(db);

        let updated = repo
            .update(note::ActiveModel {
                id: Set(3),
                body: Set("changed".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(updated.body, "changed");
    }

    #[tokio::test]
    async fn test_delete_by_id_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = BaseRepository::<note::Entity>::new(db);

        assert_eq!(repo.delete_by_id(1).await.unwrap(), 1);
        assert_eq!(repo.delete_by_id(1).await.unwrap(), 0);
    }
}
