//! CLI command implementations
//!
//! Boot order for `serve` and `inspect`:
//! 1. Configuration load and validation
//! 2. Store open (durable: full replay of the record log)
//! 3. Engine, causal graph and catalog construction
//! 4. Serving (serve only)
//!
//! Any failure before serving halts startup.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use super::args::Command;
use super::config::{Config, StorageMode};
use super::errors::{CliError, CliResult};
use super::io::write_response;
use crate::http_server::{AppState, HttpServer};
use crate::observability::{log_event, log_event_with_fields, Event, ObservationScope};
use crate::storage::{log_path, LogWriter, RecordStore};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::Inspect { config } => inspect(&config),
    }
}

/// Creates `<data_dir>/data/records.log`. Refuses an initialized directory.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    if config.storage_mode == StorageMode::Memory {
        return Err(CliError::config_error(
            "init requires storage_mode 'durable'",
        ));
    }
    let data_dir = config.require_data_path()?;

    if is_initialized(&data_dir) {
        return Err(CliError::already_initialized(&data_dir));
    }

    LogWriter::open(&data_dir)
        .map_err(CliError::log_create_failed)?;

    write_response(json!({
        "initialized": true,
        "data_dir": data_dir.to_string_lossy(),
    }))
}

/// Opens the configured store, replaying the record log when durable.
pub fn open_store(config: &Config) -> CliResult<RecordStore> {
    let store = match config.storage_mode {
        StorageMode::Memory => RecordStore::in_memory(),
        StorageMode::Durable => {
            let data_dir = config.require_data_path()?;
            if !is_initialized(&data_dir) {
                return Err(CliError::not_initialized(&data_dir));
            }
            replay(&data_dir)?
        }
    };

    log_event_with_fields(
        Event::StoreOpened,
        &[("storage_mode", config.storage_mode.as_str())],
    );
    Ok(store)
}

fn replay(data_dir: &Path) -> CliResult<RecordStore> {
    let dir = data_dir.to_string_lossy();
    let scope = ObservationScope::with_fields("STORE_REPLAY", &[("data_dir", &dir)]);

    match RecordStore::open(data_dir) {
        Ok(store) => {
            let stats = store
                .stats()
                .map_err(CliError::store_unavailable)?;
            let records = (stats.substances
                + stats.kinds
                + stats.attributes
                + stats.modes
                + stats.potentialities
                + stats.actualities
                + stats.causal_relations)
                .to_string();
            scope.complete_with_fields(&[("live_records", &records)]);
            Ok(store)
        }
        Err(e) => {
            let reason = e.to_string();
            if e.is_fatal() {
                log_event_with_fields(Event::StoreCorruption, &[("reason", &reason)]);
                scope.fail_fatal(&reason);
            } else {
                scope.fail(&reason);
            }
            Err(CliError::replay_failed(&e))
        }
    }
}

/// Boots and serves HTTP until Ctrl-C. `port` overrides `http.port`.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);
    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("actualization_policy", config.actualization_policy.as_str()),
            ("storage_mode", config.storage_mode.as_str()),
        ],
    );

    let store = Arc::new(open_store(&config)?);
    let state = Arc::new(AppState::new(store, config.actualization_policy));

    let mut http_config = config.http.clone();
    if let Some(port) = port {
        http_config.port = port;
    }
    let server = HttpServer::new(http_config, state);
    log_event(Event::BootComplete);

    let rt = tokio::runtime::Runtime::new()
        .map_err(CliError::runtime_failed)?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(CliError::server_failed)
    })
}

/// Replays the store and prints its record counts.
pub fn inspect(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store = open_store(&config)?;
    let stats = store.stats().map_err(CliError::store_unavailable)?;

    let log_bytes = store.log_size().map_err(CliError::store_unavailable)?;

    write_response(json!({
        "storage_mode": config.storage_mode.as_str(),
        "durable": store.is_durable(),
        "log_bytes": log_bytes,
        "counts": stats,
    }))
}

fn is_initialized(data_dir: &Path) -> bool {
    log_path(data_dir).exists()
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir) -> std::path::PathBuf {
        let config_path = temp_dir.path().join("oaas.json");
        let data_dir = temp_dir.path().join("db");
        let config = json!({ "data_dir": data_dir.to_string_lossy() });
        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_record_log() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();
        assert!(log_path(&temp_dir.path().join("db")).exists());
    }

    #[test]
    fn test_init_refuses_reinit() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();
        let err = init(&config_path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_inspect_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        let err = inspect(&config_path).unwrap_err();
        assert_eq!(err.code(), CliErrorCode::NotInitialized);
    }

    #[test]
    fn test_inspect_after_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir);

        init(&config_path).unwrap();
        inspect(&config_path).unwrap();
    }

    #[test]
    fn test_memory_store_needs_no_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("oaas.json");
        fs::write(&config_path, json!({ "storage_mode": "memory" }).to_string()).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert!(!open_store(&config).unwrap().is_durable());
        assert_eq!(init(&config_path).unwrap_err().code(), CliErrorCode::ConfigError);
    }
}
