//! CLI errors
//!
//! Every CLI error ends the process with a non-zero exit status. The code
//! tells an operator which boot step failed: configuration, the data
//! directory, store replay, or the HTTP listener.

use std::fmt;
use std::io;
use std::path::Path;

use crate::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file missing, unreadable or invalid
    ConfigError,
    /// stdout or filesystem failure
    IoError,
    /// `init` pointed at a directory that already has a record log
    AlreadyInitialized,
    /// `serve` or `inspect` pointed at a directory without a record log
    NotInitialized,
    /// Replay found a damaged record log; nothing was served
    StoreCorrupted,
    /// Store replay, runtime or listener failed for any other reason
    BootFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "OAAS_CLI_CONFIG_ERROR",
            Self::IoError => "OAAS_CLI_IO_ERROR",
            Self::AlreadyInitialized => "OAAS_CLI_ALREADY_INITIALIZED",
            Self::NotInitialized => "OAAS_CLI_NOT_INITIALIZED",
            Self::StoreCorrupted => "OAAS_CLI_STORE_CORRUPTED",
            Self::BootFailed => "OAAS_CLI_BOOT_FAILED",
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn already_initialized(data_dir: &Path) -> Self {
        Self::new(
            CliErrorCode::AlreadyInitialized,
            format!("{} already holds a record log", data_dir.display()),
        )
    }

    pub fn not_initialized(data_dir: &Path) -> Self {
        Self::new(
            CliErrorCode::NotInitialized,
            format!(
                "{} has no record log. Run 'oaas init' first.",
                data_dir.display()
            ),
        )
    }

    /// `init` could not create the data directory or the empty log.
    pub fn log_create_failed(err: StorageError) -> Self {
        Self::new(
            CliErrorCode::IoError,
            format!("Failed to create record log: {}", err),
        )
    }

    /// Replay of the record log failed. Corruption gets its own code.
    pub fn replay_failed(err: &StorageError) -> Self {
        let code = if err.is_fatal() {
            CliErrorCode::StoreCorrupted
        } else {
            CliErrorCode::BootFailed
        };
        Self::new(
            code,
            format!("Store replay failed: {}. System cannot serve requests.", err),
        )
    }

    /// The opened store could not be read for reporting.
    pub fn store_unavailable(err: StorageError) -> Self {
        Self::new(CliErrorCode::BootFailed, err.to_string())
    }

    pub fn runtime_failed(err: io::Error) -> Self {
        Self::new(
            CliErrorCode::BootFailed,
            format!("Failed to create tokio runtime: {}", err),
        )
    }

    pub fn server_failed(err: io::Error) -> Self {
        Self::new(CliErrorCode::BootFailed, format!("HTTP server failed: {}", err))
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(CliErrorCode::IoError, e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(CliErrorCode::IoError, format!("JSON error: {}", e))
    }
}

pub type CliResult<T> = Result<T, CliError>;
