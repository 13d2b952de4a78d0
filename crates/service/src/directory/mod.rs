//! Business directory: repository seam, its store-backed implementation and
//! the service that applies the CRUD rules.

pub mod repository;
pub mod service;
pub mod store;

pub use repository::DirectoryRepository;
pub use service::DirectoryService;
pub use store::DirectoryStore;
