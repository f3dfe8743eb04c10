//! CLI argument definitions using clap
//!
//! Commands:
//! - oaas init --config <path>
//! - oaas serve --config <path> [--port <n>]
//! - oaas inspect --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// oaas - substances, potentialities and their actualization
#[derive(Parser, Debug)]
#[command(name = "oaas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and an empty record log
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./oaas.json")]
        config: PathBuf,
    },

    /// Replay the store and serve the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./oaas.json")]
        config: PathBuf,

        /// Overrides `http.port` from the configuration file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Replay the store and print record counts as JSON
    Inspect {
        /// Path to configuration file
        #[arg(long, default_value = "./oaas.json")]
        config: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
