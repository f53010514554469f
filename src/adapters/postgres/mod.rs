//! PostgreSQL adapter
//!
//! Destination store integration: pooled connections, schema management,
//! and the transactional batch loader.

pub mod client;
pub mod loader;

pub use client::PostgresClient;
pub use loader::Loader;
