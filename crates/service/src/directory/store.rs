use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::business::next_business_id;
use models::{Business, BusinessFields, Review, ReviewFields};

use crate::directory::repository::DirectoryRepository;
use crate::errors::ServiceError;
use crate::storage::snapshot_store::SnapshotStore;

/// Directory kept in a [`SnapshotStore`]; every lookup is a linear scan.
#[derive(Clone)]
pub struct DirectoryStore {
    store: Arc<SnapshotStore<Business>>,
}

impl DirectoryStore {
    pub fn in_memory(initial: Vec<Business>) -> Arc<Self> {
        Arc::new(Self { store: SnapshotStore::in_memory(initial) })
    }

    /// File-backed directory; an existing snapshot takes precedence over `initial`.
    pub async fn open<P: Into<PathBuf>>(path: P, initial: Vec<Business>) -> Result<Arc<Self>, ServiceError> {
        let store = SnapshotStore::open(path, initial).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }
}

#[async_trait]
impl DirectoryRepository for DirectoryStore {
    async fn list_businesses(&self) -> Result<Vec<Business>, ServiceError> {
        Ok(self.store.list().await)
    }

    async fn get_business(&self, id: u64) -> Result<Option<Business>, ServiceError> {
        Ok(self.store.read(|all| all.iter().find(|b| b.id == id).cloned()).await)
    }

    async fn insert_business(&self, fields: BusinessFields) -> Result<Business, ServiceError> {
        self.store
            .update(|all| {
                let id = next_business_id(all)
                    .ok_or_else(|| ServiceError::Storage("business ids exhausted".into()))?;
                let business = Business::new(id, fields);
                all.push(business.clone());
                Ok(business)
            })
            .await
    }

    async fn update_business(&self, id: u64, fields: BusinessFields) -> Result<Option<Business>, ServiceError> {
        self.store
            .update(|all| {
                Ok(all.iter_mut().find(|b| b.id == id).map(|b| {
                    b.apply(fields);
                    b.clone()
                }))
            })
            .await
    }

    async fn delete_business(&self, id: u64) -> Result<bool, ServiceError> {
        self.store
            .update(|all| {
                let Some(pos) = all.iter().position(|b| b.id == id) else { return Ok(false) };
                all.remove(pos);
                Ok(true)
            })
            .await
    }

    async fn insert_review(&self, business_id: u64, fields: ReviewFields) -> Result<Option<Review>, ServiceError> {
        self.store
            .update(|all| {
                let Some(business) = all.iter_mut().find(|b| b.id == business_id) else { return Ok(None) };
                let id = business
                    .next_review_id()
                    .ok_or_else(|| ServiceError::Storage(format!("review ids exhausted in business {business_id}")))?;
                let review = Review::new(id, fields);
                business.reviews.push(review.clone());
                Ok(Some(review))
            })
            .await
    }

    async fn update_review(
        &self,
        business_id: u64,
        review_id: u64,
        fields: ReviewFields,
    ) -> Result<Option<Review>, ServiceError> {
        self.store
            .update(|all| {
                let review = all
                    .iter_mut()
                    .find(|b| b.id == business_id)
                    .and_then(|b| b.review_mut(review_id));
                Ok(review.map(|r| {
                    r.apply(fields);
                    r.clone()
                }))
            })
            .await
    }

    async fn delete_review(&self, business_id: u64, review_id: u64) -> Result<bool, ServiceError> {
        self.store
            .update(|all| {
                let Some(business) = all.iter_mut().find(|b| b.id == business_id) else { return Ok(false) };
                let Some(pos) = business.reviews.iter().position(|r| r.id == review_id) else { return Ok(false) };
                business.reviews.remove(pos);
                Ok(true)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::business::sample_directory;
    use serde_json::Number;

    fn fields(name: &str) -> BusinessFields {
        BusinessFields { name: name.into(), town: "Goa".into(), rating: Number::from(4) }
    }

    fn review(user: &str) -> ReviewFields {
        ReviewFields { username: user.into(), comment: "ok".into(), stars: Number::from(3) }
    }

    #[tokio::test]
    async fn concurrent_inserts_get_distinct_ids() -> Result<(), anyhow::Error> {
        let store = DirectoryStore::in_memory(sample_directory());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.insert_business(fields(&format!("b{i}"))).await }));
        }
        let mut ids = Vec::new();
        for h in handles {
            ids.push(h.await??.id);
        }
        ids.sort_unstable();
        assert_eq!(ids, (5..37).collect::<Vec<u64>>());
        Ok(())
    }

    #[tokio::test]
    async fn review_ids_are_scoped_per_business() -> Result<(), anyhow::Error> {
        let store = DirectoryStore::in_memory(sample_directory());
        assert_eq!(store.insert_review(1, review("a")).await?.map(|r| r.id), Some(1));
        assert_eq!(store.insert_review(1, review("b")).await?.map(|r| r.id), Some(2));
        assert_eq!(store.insert_review(2, review("c")).await?.map(|r| r.id), Some(1));
        assert!(store.insert_review(99, review("d")).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn misses_are_explicit() -> Result<(), anyhow::Error> {
        let store = DirectoryStore::in_memory(sample_directory());
        assert!(store.get_business(42).await?.is_none());
        assert!(store.update_business(42, fields("x")).await?.is_none());
        assert!(!store.delete_business(42).await?);
        assert!(store.update_review(1, 1, review("x")).await?.is_none());
        assert!(!store.delete_review(1, 1).await?);
        assert!(!store.delete_review(42, 1).await?);
        assert_eq!(store.list_businesses().await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_business_drops_its_reviews() -> Result<(), anyhow::Error> {
        let store = DirectoryStore::in_memory(sample_directory());
        store.insert_review(4, review("a")).await?;
        assert!(store.delete_business(4).await?);
        // highest id freed, so it is handed out again
        let again = store.insert_business(fields("new")).await?;
        assert_eq!(again.id, 4);
        assert!(again.reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn file_backed_directory_survives_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("directory_store_{}.json", uuid::Uuid::new_v4()));
        let store = DirectoryStore::open(&tmp, sample_directory()).await?;
        assert!(store.is_persistent());
        store.insert_business(fields("Test Cafe")).await?;
        store.insert_review(5, review("alice")).await?;

        let reopened = DirectoryStore::open(&tmp, Vec::new()).await?;
        let b = reopened.get_business(5).await?.expect("persisted business");
        assert_eq!(b.name, "Test Cafe");
        assert_eq!(b.reviews.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_snapshot_write_leaves_directory_unchanged() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("directory_store_gone_{}", uuid::Uuid::new_v4()));
        let store = DirectoryStore::open(dir.join("businesses.json"), sample_directory()).await?;
        tokio::fs::remove_dir_all(&dir).await?;

        let res = store.insert_business(fields("Lost Cafe")).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));
        let res = store.insert_review(1, review("alice")).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));

        let all = store.list_businesses().await?;
        assert_eq!(all.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!(all[0].reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn exhausted_ids_are_storage_errors() -> Result<(), anyhow::Error> {
        let mut initial = sample_directory();
        initial[3].id = u64::MAX;
        initial[0].reviews.push(Review::new(u64::MAX, review("max")));
        let store = DirectoryStore::in_memory(initial);

        assert!(matches!(store.insert_business(fields("x")).await, Err(ServiceError::Storage(_))));
        assert!(matches!(store.insert_review(1, review("y")).await, Err(ServiceError::Storage(_))));
        assert_eq!(store.list_businesses().await?.len(), 4);
        assert_eq!(store.get_business(1).await?.map(|b| b.reviews.len()), Some(1));
        Ok(())
    }
}
