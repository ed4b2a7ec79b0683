//! Catalog module: domain, repository and service layers for the product
//! and cat toy catalogs.
//!
//! Both catalogs share one implementation; a [`CatalogKind`] tells them apart.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;
pub mod validation;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use domain::{CatalogKind, Item};
pub use repository::{memory, CatalogRepository};
pub use service::{CatalogService, DynCatalogService};

use repo::seaorm::SeaOrmCatalogRepository;

/// The two catalog services the application exposes.
#[derive(Clone)]
pub struct CatalogServices {
    pub products: Arc<DynCatalogService>,
    pub cat_toys: Arc<DynCatalogService>,
}

impl CatalogServices {
    pub fn new(products: Arc<dyn CatalogRepository>, cat_toys: Arc<dyn CatalogRepository>) -> Self {
        Self {
            products: Arc::new(CatalogService::new(CatalogKind::Product, products)),
            cat_toys: Arc::new(CatalogService::new(CatalogKind::CatToy, cat_toys)),
        }
    }

    /// Services backed by the `product` and `cat_toy` tables.
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmCatalogRepository::<models::product::Entity>::new(db.clone())),
            Arc::new(SeaOrmCatalogRepository::<models::cat_toy::Entity>::new(db)),
        )
    }

    /// Services backed by process memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(memory::InMemoryCatalogRepository::new()), Arc::new(memory::InMemoryCatalogRepository::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_services_keep_catalogs_apart() -> Result<(), anyhow::Error> {
        let services = CatalogServices::seaorm(get_db().await?);
        let product = services.products.save(Item::of("p", "m", 1, "http://p")).await?;
        let toy = services.cat_toys.save(Item::of("t", "m", 2, "http://t")).await?;

        assert_eq!(services.products.find_all().await?, vec![product.clone()]);
        assert_eq!(services.cat_toys.find_all().await?, vec![toy]);

        services.products.delete(&product).await?;
        assert!(services.products.find_all().await?.is_empty());
        assert_eq!(services.cat_toys.find_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_update_of_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let services = CatalogServices::seaorm(get_db().await?);
        let err = services.products.update(100, Item::of("n", "m", 1, "http://x")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { kind: CatalogKind::Product, id: 100 }));
        Ok(())
    }

    #[tokio::test]
    async fn in_memory_services_report_their_kind() {
        let services = CatalogServices::in_memory();
        assert_eq!(services.products.kind(), CatalogKind::Product);
        assert_eq!(services.cat_toys.kind(), CatalogKind::CatToy);
    }
}
