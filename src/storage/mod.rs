//! Record storage for oaas
//!
//! The store holds every substance, kind, attribute, mode, potentiality,
//! actuality, and causal relation. Reads go to in-memory tables; a durable
//! store additionally appends every committed change to a checksummed,
//! append-only record log and rebuilds its tables from that log on open.
//!
//! # Design Principles
//!
//! - Append-only log (no in-place updates)
//! - Checksum-verified on every read
//! - A batch is fsynced before it becomes visible
//! - Corruption halts replay; the store never guesses
//! - Consumers depend on the `FactStore` / `StoreView` / `Store` traits,
//!   not on `RecordStore`

mod checksum;
mod errors;
mod reader;
mod record;
mod store;
mod tables;
mod writer;

pub use checksum::compute_checksum;
pub use errors::{Severity, StorageError, StorageErrorCode, StorageResult};
pub use reader::LogReader;
pub use record::Record;
pub use store::{FactStore, RecordStore, Store, StoreUpdate, StoreView};
pub use tables::{StoreStats, Tables};
pub use writer::{log_path, LogWriter, LOG_FILE_NAME};
