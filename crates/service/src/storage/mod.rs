//! Storage abstractions for service layer
//!
//! A single generic store keeps an ordered record list behind one lock and
//! optionally mirrors it to a JSON file after each mutation.

pub mod snapshot_store;
