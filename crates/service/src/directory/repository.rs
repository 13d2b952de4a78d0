use async_trait::async_trait;
use models::{Business, BusinessFields, Review, ReviewFields};

use crate::errors::ServiceError;

/// Storage abstraction for the directory.
///
/// Lookups return `Option` so every miss has an explicit branch; the service
/// turns `None` into `NotFound`. Id assignment belongs to the implementation
/// because it must happen under the same lock as the append.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn list_businesses(&self) -> Result<Vec<Business>, ServiceError>;
    async fn get_business(&self, id: u64) -> Result<Option<Business>, ServiceError>;
    async fn insert_business(&self, fields: BusinessFields) -> Result<Business, ServiceError>;
    async fn update_business(&self, id: u64, fields: BusinessFields) -> Result<Option<Business>, ServiceError>;
    /// Returns whether a record was removed.
    async fn delete_business(&self, id: u64) -> Result<bool, ServiceError>;

    /// `None` when the business does not exist.
    async fn insert_review(&self, business_id: u64, fields: ReviewFields) -> Result<Option<Review>, ServiceError>;
    async fn update_review(
        &self,
        business_id: u64,
        review_id: u64,
        fields: ReviewFields,
    ) -> Result<Option<Review>, ServiceError>;
    async fn delete_review(&self, business_id: u64, review_id: u64) -> Result<bool, ServiceError>;
}
