//! Command-line interface for the flowscore pipeline, based on clap.

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::FlowscoreError;

/// flowscore — scores network flow rows through a remote service.
#[derive(Debug, Parser)]
#[command(name = "flowscore", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Scoring endpoint URL (overrides config file and environment).
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Enable verbose logging.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score every row in a JSON file and print the badges.
    Run {
        /// Path to a JSON array of row objects.
        file: String,

        /// Cap on simultaneously in-flight requests.
        #[arg(long)]
        max_concurrent: Option<usize>,
    },

    /// Print the effective configuration.
    Config,
}

/// Reads a feed file: a JSON array of row objects.
pub fn load_rows(path: &Path) -> Result<Vec<serde_json::Value>, FlowscoreError> {
    let contents = std::fs::read_to_string(path)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&contents)?;
    Ok(rows)
}
