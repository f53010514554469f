//! College Scorecard API adapter
//!
//! Paginated HTTP retrieval of raw record batches. Errors never leak the
//! underlying HTTP client's types; they surface as
//! [`crate::domain::FetchError`].

pub mod client;
pub mod models;

pub use client::{ScorecardClient, PER_PAGE};
pub use models::{FetchFailure, Fields, SchoolsPage};
