//! Directory records and the form inputs that create or overwrite them.

pub mod business;
pub mod errors;
pub mod number;
pub mod review;

pub use business::{Business, BusinessFields, BusinessForm};
pub use errors::ModelError;
pub use review::{Review, ReviewFields, ReviewForm};
