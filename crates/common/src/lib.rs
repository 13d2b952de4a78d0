//! Shared building blocks for the directory service crates.

pub mod env;
pub mod types;
pub mod utils;
