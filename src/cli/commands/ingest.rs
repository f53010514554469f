//! Ingest command implementation
//!
//! This module implements the `ingest` command for loading institution data
//! from the College Scorecard API into PostgreSQL.

use crate::config::load_config;
use crate::core::ingest::IngestCoordinator;
use clap::Args;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Dry run mode - fetch and transform without writing to PostgreSQL
    #[arg(long)]
    pub dry_run: bool,

    /// Stop fetching after this many pages per entity
    #[arg(long)]
    pub page_limit: Option<u32>,

    /// Override the dataset year stamped onto finance and admission rows
    #[arg(long)]
    pub data_year: Option<i32>,
}

impl IngestArgs {
    /// Execute the ingest command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting ingest command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(limit) = self.page_limit {
            tracing::info!(page_limit = limit, "Overriding page limit from CLI");
            config.scorecard.page_limit = Some(limit);
        }
        if let Some(year) = self.data_year {
            tracing::info!(data_year = year, "Overriding dataset year from CLI");
            config.scorecard.data_year = year;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            println!("DRY RUN MODE - No data will be written to the database");
            println!();
        }

        // Confirmation prompt (unless --yes or dry-run)
        if !self.yes && !config.application.dry_run {
            println!("Ingest Configuration:");
            println!("  Scorecard endpoint: {}", config.scorecard.base_url);
            println!("  Dataset year: {}", config.scorecard.data_year);
            println!(
                "  Page limit: {}",
                config
                    .scorecard
                    .page_limit
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "until end of data".to_string())
            );
            println!();
            print!("Proceed with ingest? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Ingest cancelled.");
                return Ok(0);
            }
        }

        tracing::info!("Creating ingest coordinator");
        let coordinator = match IngestCoordinator::new(config).await {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create ingest coordinator");
                eprintln!("Failed to initialize ingest: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        println!("Starting ingest...");
        println!();

        let summary = match coordinator.execute_ingest().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Ingest failed");
                eprintln!("Ingest failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("Ingest Summary:");
        for stage in &summary.stages {
            println!(
                "  {:<10} {:<12} {} pages, {} records",
                stage.entity.to_string(),
                stage.state.to_string(),
                stage.pages,
                stage.records_loaded
            );
        }
        println!("  Total records: {}", summary.total_records());
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!();

        if !summary.errors.is_empty() {
            println!("Errors encountered:");
            for error in &summary.errors {
                match error.entity {
                    Some(entity) => {
                        println!("  - [{entity}] {}: {}", error.error_type, error.message)
                    }
                    None => println!("  - {}: {}", error.error_type, error.message),
                }
            }
            println!();
        }

        let exit_code = if summary.is_successful() {
            println!("Ingest completed successfully!");
            0
        } else if summary.is_partial() {
            println!("Ingest completed with failures; committed stages were kept.");
            1 // Partial success
        } else {
            println!("Ingest failed before any stage committed.");
            5
        };

        Ok(exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_args_defaults() {
        let args = IngestArgs {
            yes: false,
            dry_run: false,
            page_limit: None,
            data_year: None,
        };

        assert!(!args.yes);
        assert!(!args.dry_run);
        assert!(args.page_limit.is_none());
        assert!(args.data_year.is_none());
    }
}
