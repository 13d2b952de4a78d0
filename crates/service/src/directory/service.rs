use std::sync::Arc;

use models::{Business, BusinessForm, Review, ReviewForm};
use tracing::{debug, info, instrument};

use crate::directory::repository::DirectoryRepository;
use crate::errors::ServiceError;

/// Application service for the business directory.
///
/// Lookups run before form validation, so an unknown id answers `NotFound`
/// even when the submitted fields are incomplete.
#[derive(Clone)]
pub struct DirectoryService {
    repo: Arc<dyn DirectoryRepository>,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn DirectoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_businesses(&self) -> Result<Vec<Business>, ServiceError> {
        self.repo.list_businesses().await
    }

    pub async fn get_business(&self, id: u64) -> Result<Business, ServiceError> {
        self.repo
            .get_business(id)
            .await?
            .ok_or_else(|| ServiceError::business_not_found(id))
    }

    #[instrument(skip(self, form))]
    pub async fn create_business(&self, form: BusinessForm) -> Result<Business, ServiceError> {
        let fields = form.validate()?;
        let created = self.repo.insert_business(fields).await?;
        info!(business_id = created.id, name = %created.name, "business created");
        Ok(created)
    }

    #[instrument(skip(self, form))]
    pub async fn update_business(&self, id: u64, form: BusinessForm) -> Result<Business, ServiceError> {
        self.get_business(id).await?;
        let fields = form.validate()?;
        let updated = self
            .repo
            .update_business(id, fields)
            .await?
            .ok_or_else(|| ServiceError::business_not_found(id))?;
        info!(business_id = id, "business updated");
        Ok(updated)
    }

    /// Idempotent: deleting a missing id is not an error.
    #[instrument(skip(self))]
    pub async fn delete_business(&self, id: u64) -> Result<bool, ServiceError> {
        let removed = self.repo.delete_business(id).await?;
        if removed {
            info!(business_id = id, "business deleted");
        } else {
            debug!(business_id = id, "delete of unknown business ignored");
        }
        Ok(removed)
    }

    pub async fn list_reviews(&self, business_id: u64) -> Result<Vec<Review>, ServiceError> {
        Ok(self.get_business(business_id).await?.reviews)
    }

    pub async fn get_review(&self, business_id: u64, review_id: u64) -> Result<Review, ServiceError> {
        self.get_business(business_id)
            .await?
            .review(review_id)
            .cloned()
            .ok_or_else(|| ServiceError::review_not_found(business_id, review_id))
    }

    #[instrument(skip(self, form))]
    pub async fn add_review(&self, business_id: u64, form: ReviewForm) -> Result<Review, ServiceError> {
        self.get_business(business_id).await?;
        let fields = form.validate()?;
        let review = self
            .repo
            .insert_review(business_id, fields)
            .await?
            .ok_or_else(|| ServiceError::business_not_found(business_id))?;
        info!(business_id, review_id = review.id, "review added");
        Ok(review)
    }

    #[instrument(skip(self, form))]
    pub async fn edit_review(&self, business_id: u64, review_id: u64, form: ReviewForm) -> Result<Review, ServiceError> {
        self.get_review(business_id, review_id).await?;
        let fields = form.validate()?;
        let review = self
            .repo
            .update_review(business_id, review_id, fields)
            .await?
            .ok_or_else(|| ServiceError::review_not_found(business_id, review_id))?;
        info!(business_id, review_id, "review updated");
        Ok(review)
    }

    /// Idempotent: a missing business or review is not an error.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, business_id: u64, review_id: u64) -> Result<bool, ServiceError> {
        let removed = self.repo.delete_review(business_id, review_id).await?;
        if removed {
            info!(business_id, review_id, "review deleted");
        } else {
            debug!(business_id, review_id, "delete of unknown review ignored");
        }
        Ok(removed)
    }
}
