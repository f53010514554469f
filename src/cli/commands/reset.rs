//! Reset command implementation
//!
//! This module implements the `reset` command, the only deletion path for
//! the append-only destination store. It truncates every destination table
//! so a fresh ingest can run against an empty schema.

use crate::adapters::postgres::PostgresClient;
use crate::config::load_config;
use clap::Args;

/// Arguments for the reset command
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl ResetArgs {
    /// Execute the reset command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting reset command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let client = match PostgresClient::new(config.postgres).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to create PostgreSQL client: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        if let Err(e) = client.test_connection().await {
            eprintln!("Failed to connect to PostgreSQL: {e}");
            return Ok(4);
        }

        if !self.yes {
            println!(
                "This will DELETE ALL ROWS from {}",
                client.connection_string_safe()
            );
            print!("Proceed with reset? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Reset cancelled.");
                return Ok(0);
            }
        }

        match client.reset_all().await {
            Ok(()) => {
                println!("All destination tables truncated.");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Reset failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
