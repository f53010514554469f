//! External integrations
//!
//! Adapters for the upstream Scorecard API and the downstream PostgreSQL
//! store. Each adapter converts its third-party errors into the domain
//! error taxonomy at the boundary.

pub mod postgres;
pub mod scorecard;
