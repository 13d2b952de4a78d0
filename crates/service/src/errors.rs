use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn business_not_found(id: u64) -> Self {
        Self::NotFound(format!("business {id} not found"))
    }

    pub fn review_not_found(business_id: u64, review_id: u64) -> Self {
        Self::NotFound(format!("review {review_id} not found in business {business_id}"))
    }
}
