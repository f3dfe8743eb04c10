//! CLI for oaas
//!
//! - init: create the data directory and record log
//! - serve: replay the store, then serve HTTP
//! - inspect: replay the store and print record counts

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, inspect, open_store, run, run_command, serve};
pub use config::{Config, StorageMode};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
