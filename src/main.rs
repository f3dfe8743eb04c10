//! oaas entry point
//!
//! Parses arguments, dispatches to `cli::run`, prints any error to stderr
//! and exits non-zero. Configuration, storage and serving all live in the
//! library.

use oaas::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
