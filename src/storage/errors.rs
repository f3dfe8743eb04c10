//! Storage error types
//!
//! Error codes:
//! - OAAS_STORE_UNAVAILABLE (ERROR severity)
//! - OAAS_STORAGE_WRITE_FAILED (ERROR severity)
//! - OAAS_STORAGE_READ_FAILED (ERROR severity)
//! - OAAS_DATA_CORRUPTION (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// The store cannot be trusted; the process must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Store state unreachable (a lock poisoned by a panicked writer)
    OaasStoreUnavailable,
    /// Record append failed
    OaasStorageWriteFailed,
    /// Record read failed
    OaasStorageReadFailed,
    /// Checksum or framing failure in the record log
    OaasDataCorruption,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::OaasStoreUnavailable => "OAAS_STORE_UNAVAILABLE",
            StorageErrorCode::OaasStorageWriteFailed => "OAAS_STORAGE_WRITE_FAILED",
            StorageErrorCode::OaasStorageReadFailed => "OAAS_STORAGE_READ_FAILED",
            StorageErrorCode::OaasDataCorruption => "OAAS_DATA_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::OaasDataCorruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message, optional context, and underlying cause
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StorageError {
    fn build(code: StorageErrorCode, message: impl Into<String>, source: Option<io::Error>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source,
        }
    }

    /// Create a new write failed error
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::build(StorageErrorCode::OaasStorageWriteFailed, message, Some(source))
    }

    /// Create a write failed error without an I/O source
    pub fn write_failed_no_source(message: impl Into<String>) -> Self {
        Self::build(StorageErrorCode::OaasStorageWriteFailed, message, None)
    }

    /// Create a new read failed error
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self::build(StorageErrorCode::OaasStorageReadFailed, message, Some(source))
    }

    /// Create an error for a store lock poisoned by a panicking writer
    pub fn lock_poisoned(what: &str) -> Self {
        Self::build(
            StorageErrorCode::OaasStoreUnavailable,
            format!("{} lock poisoned by a panicked writer", what),
            None,
        )
    }

    /// Create a new data corruption error (FATAL)
    pub fn data_corruption(message: impl Into<String>) -> Self {
        Self::build(StorageErrorCode::OaasDataCorruption, message, None)
    }

    /// Create a data corruption error with byte offset context
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        let mut err = Self::data_corruption(reason);
        err.details = Some(format!("byte_offset: {}", offset));
        err
    }

    /// Returns the error code
    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional error details
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error is fatal
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
