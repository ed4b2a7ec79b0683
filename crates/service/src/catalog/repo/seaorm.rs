use std::marker::PhantomData;

use async_trait::async_trait;
use models::catalog::CatalogTable;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, IntoActiveModel, PaginatorTrait, PrimaryKeyTrait,
    QueryOrder,
};
use tracing::{debug, error};

use crate::catalog::domain::Item;
use crate::catalog::repository::CatalogRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository implementation, generic over the catalog table.
pub struct SeaOrmCatalogRepository<E> {
    pub db: DatabaseConnection,
    table: PhantomData<fn() -> E>,
}

impl<E> SeaOrmCatalogRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, table: PhantomData }
    }
}

fn db_err(e: DbErr) -> ServiceError {
    error!(err = %e, "catalog storage error");
    ServiceError::Db(e.to_string())
}

#[async_trait]
impl<E> CatalogRepository for SeaOrmCatalogRepository<E>
where
    E: CatalogTable,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i64>,
{
    async fn create(&self, item: &Item) -> Result<Item, ServiceError> {
        let model = E::new_active(item.columns()).insert(&self.db).await.map_err(db_err)?;
        let created: Item = E::to_row(model).into();
        debug!(id = ?created.id, "row inserted");
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, ServiceError> {
        let found = E::find_by_id(id).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(|m| E::to_row(m).into()))
    }

    async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        let rows = E::find().order_by_asc(E::id_column()).all(&self.db).await.map_err(db_err)?;
        Ok(rows.into_iter().map(|m| E::to_row(m).into()).collect())
    }

    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Item>, ServiceError> {
        let rows = E::find()
            .order_by_asc(E::id_column())
            .paginate(&self.db, per_page)
            .fetch_page(page_idx)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(|m| E::to_row(m).into()).collect())
    }

    async fn update(&self, id: i64, changes: &Item) -> Result<Option<Item>, ServiceError> {
        let Some(model) = E::find_by_id(id).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        E::assign(&mut am, changes.columns());
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(Some(E::to_row(updated).into()))
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let res = E::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let count = E::find_by_id(id).count(&self.db).await.map_err(db_err)?;
        Ok(count > 0)
    }
}
