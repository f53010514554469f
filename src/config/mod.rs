//! Configuration management for Compass.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Compass uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`COMPASS_*` prefix)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [scorecard]
//! api_key = "${SCORECARD_API_KEY}"
//! data_year = 2023
//!
//! [postgres]
//! connection_string = "${COMPASS_DATABASE_URL}"
//! max_connections = 10
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use compass::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("compass.toml")?;
//! println!("Scorecard URL: {}", config.scorecard.base_url);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CompassConfig, LoggingConfig, PostgresConfig, ScorecardConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
