//! Service layer for the business directory.
//! - `storage` holds the lock-guarded record store, optionally snapshotted to JSON.
//! - `directory` defines the repository seam and the CRUD rules on top of it.

pub mod directory;
pub mod errors;
pub mod storage;
