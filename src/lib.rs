// Compass - College Scorecard to PostgreSQL ETL Tool
// Licensed under the MIT License

//! # Compass - College Scorecard ETL
//!
//! Compass is an ETL tool built in Rust that loads U.S. higher-education
//! institution statistics from the College Scorecard API into a normalized
//! PostgreSQL store for a campus-exploration service.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** paginated school records from the Scorecard schools endpoint
//! - **Transforming** raw field-named records into normalized entity rows,
//!   including zip canonicalization and region/locale code mapping
//! - **Loading** rows into PostgreSQL with one transaction per page batch
//!
//! ## Architecture
//!
//! Compass follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (mapping, transform, ingest orchestration)
//! - [`adapters`] - External integrations (Scorecard API, PostgreSQL)
//! - [`domain`] - Core domain types and the error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use compass::config::load_config;
//! use compass::core::ingest::IngestCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("compass.toml")?;
//!
//!     let coordinator = IngestCoordinator::new(config).await?;
//!     let summary = coordinator.execute_ingest().await?;
//!
//!     println!("Loaded {} records", summary.total_records());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline semantics
//!
//! Entities load in a fixed dependency order (schools first); a failed
//! stage aborts every stage after it. Loads are append-only blind inserts,
//! one transaction per fetched page, and `compass reset` is the only
//! deletion path.
//!
//! ## Error Handling
//!
//! Compass uses the [`domain::CompassError`] type for all errors:
//!
//! ```rust,no_run
//! use compass::domain::CompassError;
//!
//! fn example() -> Result<(), CompassError> {
//!     let config = compass::config::load_config("compass.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
