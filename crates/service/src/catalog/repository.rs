use async_trait::async_trait;

use crate::catalog::domain::Item;
use crate::errors::ServiceError;

/// Repository abstraction for one catalog table.
///
/// Deleting an id that is not stored is not an error; implementations
/// report it as `Ok(false)`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Insert `item` under a freshly assigned id. Any id on `item` is ignored.
    async fn create(&self, item: &Item) -> Result<Item, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, ServiceError>;
    /// All rows in id order.
    async fn find_all(&self) -> Result<Vec<Item>, ServiceError>;
    /// Zero-based page of the `find_all` ordering.
    async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Item>, ServiceError>;
    /// Overwrite the mutable fields of row `id`; `None` if it does not exist.
    async fn update(&self, id: i64, changes: &Item) -> Result<Option<Item>, ServiceError>;
    async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct InMemoryCatalogRepository {
        state: Mutex<State>,
    }

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, Item>,
        last_id: i64,
    }

    impl InMemoryCatalogRepository {
        pub fn new() -> Self { Self::default() }

        fn lock(&self) -> Result<MutexGuard<'_, State>, ServiceError> {
            self.state.lock().map_err(|e| ServiceError::Db(e.to_string()))
        }
    }

    #[async_trait]
    impl CatalogRepository for InMemoryCatalogRepository {
        async fn create(&self, item: &Item) -> Result<Item, ServiceError> {
            let mut state = self.lock()?;
            state.last_id += 1;
            let id = state.last_id;
            let stored = item.clone().with_id(id);
            state.rows.insert(id, stored.clone());
            Ok(stored)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Item>, ServiceError> {
            Ok(self.lock()?.rows.get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Item>, ServiceError> {
            Ok(self.lock()?.rows.values().cloned().collect())
        }

        async fn find_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<Item>, ServiceError> {
            let skip = page_idx.saturating_mul(per_page) as usize;
            Ok(self.lock()?.rows.values().skip(skip).take(per_page as usize).cloned().collect())
        }

        async fn update(&self, id: i64, changes: &Item) -> Result<Option<Item>, ServiceError> {
            let mut state = self.lock()?;
            Ok(state.rows.get_mut(&id).map(|stored| {
                stored.replace_fields(changes);
                stored.clone()
            }))
        }

        async fn delete_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.lock()?.rows.remove(&id).is_some())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            Ok(self.lock()?.rows.contains_key(&id))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn ids_are_never_reused() {
            let repo = InMemoryCatalogRepository::new();
            let a = repo.create(&Item::of("a", "m", 1, "i")).await.unwrap();
            assert!(repo.delete_by_id(a.id.unwrap()).await.unwrap());
            let b = repo.create(&Item::of("b", "m", 1, "i")).await.unwrap();
            assert_eq!(a.id, Some(1));
            assert_eq!(b.id, Some(2));
        }

        #[tokio::test]
        async fn created_row_is_stored_under_its_id() {
            let repo = InMemoryCatalogRepository::new();
            let created = repo.create(&Item::of("a", "m", 1, "i").with_id(42)).await.unwrap();
            assert_eq!(created.id, Some(1));
            assert_eq!(repo.find_by_id(1).await.unwrap(), Some(created));
            assert!(repo.find_by_id(42).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn pages_follow_id_order() {
            let repo = InMemoryCatalogRepository::new();
            for n in 0..5 {
                repo.create(&Item::of(format!("item{n}"), "m", n, "i")).await.unwrap();
            }
            let page: Vec<_> = repo.find_page(1, 2).await.unwrap().into_iter().map(|i| i.name).collect();
            assert_eq!(page, ["item2", "item3"]);
            assert!(repo.find_page(9, 2).await.unwrap().is_empty());
        }
    }
}
