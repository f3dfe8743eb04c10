//! Store interfaces and the record store implementation
//!
//! Consumers are written against three traits:
//! - `FactStore`: the read-only fact lookups the condition evaluator needs
//! - `StoreView`: record reads for engines and the catalog
//! - `Store`: scoped access; `view` for consistent reads, `update` for an
//!   exclusive read-check-write sequence whose staged records commit
//!   together or not at all
//!
//! `RecordStore` implements `Store` over in-memory tables, optionally
//! backed by the append-only record log.

use std::path::Path;
use std::sync::{Mutex, RwLock};

use super::errors::{StorageError, StorageResult};
use super::reader::LogReader;
use super::record::Record;
use super::tables::{StoreStats, Tables};
use super::writer::{log_path, LogWriter};
use crate::model::{Actuality, Attribute, CausalRelation, Kind, Mode, Potentiality, Substance};

/// Read-only fact lookups over recorded modes.
pub trait FactStore {
    /// Most recent mode of `substance_id` whose attribute is named
    /// `attribute_name`.
    fn find_mode(&self, substance_id: &str, attribute_name: &str) -> StorageResult<Option<Mode>>;

    /// Whether any mode of `substance_id` for `attribute_name` has exactly
    /// `value`.
    fn mode_exists(&self, substance_id: &str, attribute_name: &str, value: &str)
        -> StorageResult<bool>;
}

/// Record reads. Lists are returned in commit order.
pub trait StoreView: FactStore {
    fn substance(&self, id: &str) -> StorageResult<Option<Substance>>;
    fn substances(&self) -> StorageResult<Vec<Substance>>;
    fn kind_by_name(&self, name: &str) -> StorageResult<Option<Kind>>;
    fn kinds(&self) -> StorageResult<Vec<Kind>>;
    fn attribute(&self, id: &str) -> StorageResult<Option<Attribute>>;
    fn attribute_by_name(&self, name: &str) -> StorageResult<Option<Attribute>>;
    fn attributes(&self) -> StorageResult<Vec<Attribute>>;
    fn modes(&self) -> StorageResult<Vec<Mode>>;
    fn potentiality(&self, id: &str) -> StorageResult<Option<Potentiality>>;
    fn potentialities(&self) -> StorageResult<Vec<Potentiality>>;
    fn potentialities_for(&self, substance_id: &str) -> StorageResult<Vec<Potentiality>>;
    fn actualities_for(&self, substance_id: &str) -> StorageResult<Vec<Actuality>>;
    /// Actualities realized from one potentiality.
    fn actualities_of(&self, potentiality_id: &str) -> StorageResult<Vec<Actuality>>;
    /// Causal relations where `entity_id` is either endpoint.
    fn relations_touching(&self, entity_id: &str) -> StorageResult<Vec<CausalRelation>>;
}

/// An exclusive update scope.
///
/// Reads through `view` observe the state as of the start of the scope;
/// staged records are invisible until the scope commits.
pub trait StoreUpdate {
    fn view(&self) -> &dyn StoreView;
    fn stage(&mut self, record: Record);
}

/// Scoped access to a shared store.
pub trait Store: Send + Sync {
    /// Run `f` against a consistent snapshot.
    fn view<T, E>(&self, f: impl FnOnce(&dyn StoreView) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>;

    /// Run `f` with exclusive access and commit whatever it staged.
    ///
    /// No other update interleaves between the reads `f` performs and the
    /// commit. If `f` fails, or the commit fails, nothing is persisted.
    fn update<T, E>(&self, f: impl FnOnce(&mut dyn StoreUpdate) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>;
}

struct Staged<'a> {
    tables: &'a Tables,
    pending: Vec<Record>,
}

impl StoreUpdate for Staged<'_> {
    fn view(&self) -> &dyn StoreView {
        self.tables
    }

    fn stage(&mut self, record: Record) {
        self.pending.push(record);
    }
}

/// Record store over in-memory tables with an optional durable log.
pub struct RecordStore {
    tables: RwLock<Tables>,
    log: Option<Mutex<LogWriter>>,
}

impl RecordStore {
    /// A volatile store. Nothing survives the process.
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
            log: None,
        }
    }

    /// Opens the durable store in `data_dir`, replaying the record log.
    ///
    /// Any corruption in the log fails the open.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let writer = LogWriter::open(data_dir)?;

        let mut tables = Tables::new();
        let mut reader = LogReader::open(&log_path(data_dir))?;
        while let Some(record) = reader.read_next()? {
            tables.apply(record);
        }

        Ok(Self {
            tables: RwLock::new(tables),
            log: Some(Mutex::new(writer)),
        })
    }

    /// Whether committed records are persisted to a record log.
    pub fn is_durable(&self) -> bool {
        self.log.is_some()
    }

    /// Record counts per table.
    pub fn stats(&self) -> StorageResult<StoreStats> {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::lock_poisoned("tables"))?;
        Ok(tables.stats())
    }

    /// Committed size of the record log in bytes; `None` when volatile.
    pub fn log_size(&self) -> StorageResult<Option<u64>> {
        match self.log {
            Some(ref log) => {
                let writer = log
                    .lock()
                    .map_err(|_| StorageError::lock_poisoned("record log"))?;
                Ok(Some(writer.current_offset()))
            }
            None => Ok(None),
        }
    }

    fn persist(&self, records: &[Record]) -> StorageResult<()> {
        if let Some(ref log) = self.log {
            let mut writer = log
                .lock()
                .map_err(|_| StorageError::lock_poisoned("record log"))?;
            writer.append(records)?;
        }
        Ok(())
    }
}

impl Store for RecordStore {
    fn view<T, E>(&self, f: impl FnOnce(&dyn StoreView) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let tables = self
            .tables
            .read()
            .map_err(|_| StorageError::lock_poisoned("tables"))?;
        f(&*tables)
    }

    fn update<T, E>(&self, f: impl FnOnce(&mut dyn StoreUpdate) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
    {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| StorageError::lock_poisoned("tables"))?;

        let (value, pending) = {
            let mut staged = Staged {
                tables: &*tables,
                pending: Vec::new(),
            };
            let value = f(&mut staged)?;
            (value, staged.pending)
        };

        self.persist(&pending)?;
        for record in pending {
            tables.apply(record);
        }

        Ok(value)
    }
}
