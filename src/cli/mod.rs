//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Compass using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Compass - College Scorecard ETL Tool
#[derive(Parser, Debug)]
#[command(name = "compass")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "compass.toml", env = "COMPASS_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "COMPASS_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest institution data from the Scorecard API into PostgreSQL
    Ingest(commands::ingest::IngestArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show destination table row counts
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Truncate all destination tables
    Reset(commands::reset::ResetArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_ingest() {
        let cli = Cli::parse_from(["compass", "ingest"]);
        assert_eq!(cli.config, "compass.toml");
        assert!(matches!(cli.command, Commands::Ingest(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["compass", "--config", "custom.toml", "ingest"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["compass", "--log-level", "debug", "ingest"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["compass", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["compass", "status"]);
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["compass", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_parse_reset() {
        let cli = Cli::parse_from(["compass", "reset"]);
        assert!(matches!(cli.command, Commands::Reset(_)));
    }

    #[test]
    fn test_cli_parse_ingest_flags() {
        let cli = Cli::parse_from(["compass", "ingest", "--dry-run", "--page-limit", "2", "-y"]);
        match cli.command {
            Commands::Ingest(args) => {
                assert!(args.dry_run);
                assert!(args.yes);
                assert_eq!(args.page_limit, Some(2));
            }
            _ => panic!("expected ingest command"),
        }
    }
}
