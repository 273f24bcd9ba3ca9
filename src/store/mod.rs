//! Event Store module
//!
//! Owned, constructed-once record store shared read-only by the query layer
//! and the forecast engine.

mod error;
mod repository;

pub use error::StoreError;
pub use repository::{EventStore, StoreBuilder};
