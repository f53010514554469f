//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod ingest;
pub mod init;
pub mod reset;
pub mod status;
pub mod validate;
