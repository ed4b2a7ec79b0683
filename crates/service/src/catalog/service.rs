use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::catalog::domain::{CatalogKind, Item};
use crate::catalog::repository::CatalogRepository;
use crate::catalog::validation;
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Application service encapsulating catalog business rules.
/// One instance serves one catalog, identified by its [`CatalogKind`].
pub struct CatalogService<R: CatalogRepository + ?Sized> {
    kind: CatalogKind,
    repo: Arc<R>,
}

/// Service over a type-erased repository, as held by the HTTP layer.
pub type DynCatalogService = CatalogService<dyn CatalogRepository>;

impl<R: CatalogRepository + ?Sized> CatalogService<R> {
    pub fn new(kind: CatalogKind, repo: Arc<R>) -> Self { Self { kind, repo } }

    pub fn kind(&self) -> CatalogKind { self.kind }

    pub async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
        self.repo.find_all().await
    }

    pub async fn find_page(&self, page: Pagination) -> Result<Vec<Item>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        self.repo.find_page(page_idx, per_page).await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Item, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found(self.kind, id))
    }

    /// Validate and persist a new item.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{CatalogKind, CatalogService, Item, memory::InMemoryCatalogRepository};
    /// use std::sync::Arc;
    /// let svc = CatalogService::new(CatalogKind::Product, Arc::new(InMemoryCatalogRepository::new()));
    /// let saved = tokio_test::block_on(svc.save(Item::of("고양이 낚시대", "애옹이네 장난감", 5000, "http://image/1.jpg"))).unwrap();
    /// assert!(saved.id.is_some());
    /// assert_eq!(saved.maker, "애옹이네 장난감");
    /// ```
    #[instrument(skip(self, candidate), fields(kind = %self.kind))]
    pub async fn save(&self, candidate: Item) -> Result<Item, ServiceError> {
        validation::validate(self.kind, &candidate)?;
        let saved = self.repo.create(&candidate).await?;
        info!(id = ?saved.id, "catalog_item_created");
        Ok(saved)
    }

    /// Replace every mutable field of item `id` with the ones in `changes`.
    /// The stored id is kept; any id carried by `changes` is ignored.
    ///
    /// # Examples
    /// ```
    /// use service::catalog::{CatalogKind, CatalogService, Item, memory::InMemoryCatalogRepository};
    /// use service::errors::ServiceError;
    /// use std::sync::Arc;
    /// let svc = CatalogService::new(CatalogKind::CatToy, Arc::new(InMemoryCatalogRepository::new()));
    /// let err = tokio_test::block_on(svc.update(100, Item::of("n", "m", 1, "http://x"))).unwrap_err();
    /// assert!(matches!(err, ServiceError::NotFound { id: 100, .. }));
    /// ```
    #[instrument(skip(self, changes), fields(kind = %self.kind))]
    pub async fn update(&self, id: i64, changes: Item) -> Result<Item, ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found(self.kind, id));
        }
        validation::validate(self.kind, &changes)?;
        // the row may have been deleted since the existence check
        let updated = self
            .repo
            .update(id, &changes)
            .await?
            .ok_or_else(|| ServiceError::not_found(self.kind, id))?;
        info!(id, "catalog_item_updated");
        Ok(updated)
    }

    /// Remove `item` if it is stored. Detached items (no id) and items that
    /// are already gone are accepted silently.
    pub async fn delete(&self, item: &Item) -> Result<(), ServiceError> {
        match item.id {
            Some(id) => self.delete_by_id(id).await.map(|_| ()),
            None => {
                debug!(kind = %self.kind, "delete of unsaved item ignored");
                Ok(())
            }
        }
    }

    /// Remove item `id` if present; returns whether a row was removed.
    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        let removed = self.repo.delete_by_id(id).await?;
        if removed {
            info!(id, "catalog_item_deleted");
        } else {
            debug!(id, "delete of absent item ignored");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::InMemoryCatalogRepository;
    use async_trait::async_trait;

    const NAME: &str = "고양이 낚시대";
    const MAKER: &str = "애옹이네 장난감";
    const PRICE: i32 = 5000;
    const IMAGE: &str = "http://image.kyobobook.co.kr/newimages/giftshop_new/goods/400/1095/hot1602809707085.jpg";

    fn svc() -> CatalogService<InMemoryCatalogRepository> {
        CatalogService::new(CatalogKind::Product, Arc::new(InMemoryCatalogRepository::new()))
    }

    fn valid() -> Item { Item::of(NAME, MAKER, PRICE, IMAGE) }

    fn other() -> Item { Item::of("레이저 포인터", "다른 장난감", 20000, "http://image/other.jpg") }

    fn invalid_items() -> Vec<Item> {
        vec![
            Item::of("", "m", 100, "http://x"),
            Item::of("n", "", 100, "http://x"),
            Item::of("n", "m", -1, "http://x"),
            Item::of("n", "m", 100, ""),
        ]
    }

    #[tokio::test]
    async fn find_all_on_empty_storage_is_empty() {
        assert!(svc().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_returns_saved_items() {
        let s = svc();
        s.save(valid()).await.unwrap();
        s.save(other()).await.unwrap();
        assert_eq!(s.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn save_assigns_id_and_keeps_fields() {
        let saved = svc().save(valid()).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(Item { id: None, ..saved }, valid());
    }

    #[tokio::test]
    async fn save_ignores_candidate_id() {
        let s = svc();
        let saved = s.save(valid().with_id(999)).await.unwrap();
        assert_eq!(saved.id, Some(1));
    }

    #[tokio::test]
    async fn save_rejects_invalid_fields_without_writing() {
        let s = svc();
        for item in invalid_items() {
            let err = s.save(item).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidField { kind: CatalogKind::Product, .. }));
        }
        assert!(s.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_accepts_zero_price() {
        let saved = svc().save(Item::of("n", "m", 0, "http://x")).await.unwrap();
        assert_eq!(saved.price, 0);
    }

    #[tokio::test]
    async fn find_by_id_returns_stored_item() {
        let s = svc();
        let saved = s.save(valid()).await.unwrap();
        assert_eq!(s.find_by_id(saved.id.unwrap()).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn find_by_unknown_id_is_not_found() {
        let err = svc().find_by_id(100).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { kind: CatalogKind::Product, id: 100 }));
    }

    #[tokio::test]
    async fn update_replaces_all_fields_and_keeps_id() {
        let s = svc();
        let origin = s.save(valid()).await.unwrap();
        let id = origin.id.unwrap();

        let updated = s.update(id, other().with_id(42)).await.unwrap();
        assert_eq!(updated, other().with_id(id));
        assert_eq!(s.find_by_id(id).await.unwrap(), other().with_id(id));
    }

    #[tokio::test]
    async fn update_rejects_invalid_fields_and_keeps_stored_item() {
        let s = svc();
        let origin = s.save(valid()).await.unwrap();
        let id = origin.id.unwrap();
        for item in invalid_items() {
            let err = s.update(id, item).await.unwrap_err();
            assert!(matches!(err, ServiceError::InvalidField { .. }));
        }
        assert_eq!(s.find_by_id(id).await.unwrap(), origin);
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() {
        let err = svc().update(100, other()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { id: 100, .. }));
    }

    #[tokio::test]
    async fn update_of_unknown_id_reports_not_found_before_validation() {
        let err = svc().update(100, Item::of("", "", -1, "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_tolerates_repeated_and_detached_items() {
        let s = svc();
        let saved = s.save(valid()).await.unwrap();
        let detached = other().with_id(999);

        s.delete(&saved).await.unwrap();
        s.delete(&saved).await.unwrap();
        s.delete(&detached).await.unwrap();
        s.delete(&other()).await.unwrap();

        assert!(s.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_by_id_reports_whether_a_row_was_removed() {
        let s = svc();
        let id = s.save(valid()).await.unwrap().id.unwrap();
        assert!(s.delete_by_id(id).await.unwrap());
        assert!(!s.delete_by_id(id).await.unwrap());
    }

    #[tokio::test]
    async fn find_page_normalizes_input() {
        let s = svc();
        for n in 0..3 {
            s.save(Item::of(format!("n{n}"), "m", n, "http://x")).await.unwrap();
        }
        let first = s.find_page(Pagination { page: 0, per_page: 2 }).await.unwrap();
        assert_eq!(first.len(), 2);
        let second = s.find_page(Pagination { page: 2, per_page: 2 }).await.unwrap();
        assert_eq!(second.len(), 1);
    }

    struct BrokenRepository;

    #[async_trait]
    impl CatalogRepository for BrokenRepository {
        async fn create(&self, _: &Item) -> Result<Item, ServiceError> { Err(ServiceError::Db("down".into())) }
        async fn find_by_id(&self, _: i64) -> Result<Option<Item>, ServiceError> { Err(ServiceError::Db("down".into())) }
        async fn find_all(&self) -> Result<Vec<Item>, ServiceError> { Err(ServiceError::Db("down".into())) }
        async fn find_page(&self, _: u64, _: u64) -> Result<Vec<Item>, ServiceError> { Err(ServiceError::Db("down".into())) }
        async fn update(&self, _: i64, _: &Item) -> Result<Option<Item>, ServiceError> { Err(ServiceError::Db("down".into())) }
        async fn delete_by_id(&self, _: i64) -> Result<bool, ServiceError> { Err(ServiceError::Db("down".into())) }
        async fn exists_by_id(&self, _: i64) -> Result<bool, ServiceError> { Err(ServiceError::Db("down".into())) }
    }

    #[tokio::test]
    async fn storage_failures_propagate() {
        let s: DynCatalogService = CatalogService::new(CatalogKind::CatToy, Arc::new(BrokenRepository));
        assert!(matches!(s.find_all().await, Err(ServiceError::Db(_))));
        assert!(matches!(s.find_by_id(1).await, Err(ServiceError::Db(_))));
        assert!(matches!(s.save(valid()).await, Err(ServiceError::Db(_))));
        assert!(matches!(s.update(1, valid()).await, Err(ServiceError::Db(_))));
        assert!(matches!(s.delete(&valid().with_id(1)).await, Err(ServiceError::Db(_))));
    }
}
