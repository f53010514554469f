//! Core pipeline logic
//!
//! Pure transformation and mapping, plus the ingestion coordinator that
//! ties the adapters together. Nothing in `mapping` or `transform`
//! performs I/O.

pub mod ingest;
pub mod mapping;
pub mod transform;
