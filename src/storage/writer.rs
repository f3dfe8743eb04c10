//! Append-only writer for the record log
//!
//! A batch of records is written and fsynced before the caller applies it
//! to the in-memory tables. A failed append is rolled back to the previous
//! end of log, so the file never keeps frames the tables do not have.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::record::Record;

/// Name of the record log inside `<data_dir>/data/`
pub const LOG_FILE_NAME: &str = "records.log";

/// Returns the record log path for a data directory.
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("data").join(LOG_FILE_NAME)
}

/// Writer that appends checksummed frames to `records.log`.
pub struct LogWriter {
    file: File,
    current_offset: u64,
}

impl LogWriter {
    /// Opens or creates `<data_dir>/data/records.log`.
    pub fn open(data_dir: &Path) -> StorageResult<Self> {
        let data_subdir = data_dir.join("data");
        let log_path = log_path(data_dir);

        if !data_subdir.exists() {
            fs::create_dir_all(&data_subdir).map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to create data directory: {}", data_subdir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&log_path)
            .map_err(|e| {
                StorageError::write_failed(
                    format!("Failed to open record log: {}", log_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StorageError::write_failed("Failed to read log metadata", e))?
            .len();

        Ok(Self {
            file,
            current_offset,
        })
    }

    /// End of the last committed batch, in bytes.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends a batch of records with one fsync and returns the offset
    /// the batch starts at.
    ///
    /// Frames are encoded before anything touches the file, so an encoding
    /// failure writes nothing. A write or fsync failure truncates the log
    /// back to that offset before the error is returned.
    pub fn append(&mut self, records: &[Record]) -> StorageResult<u64> {
        if records.is_empty() {
            return Ok(self.current_offset);
        }

        let mut batch = Vec::new();
        for record in records {
            batch.extend_from_slice(&record.encode_frame()?);
        }

        let offset = self.current_offset;
        if let Err(err) = self.write_synced(&batch, records.len()) {
            if let Err(e) = self.truncate_to(offset) {
                return Err(StorageError::write_failed(
                    format!("Rollback to byte {} failed after: {}", offset, err),
                    e,
                ));
            }
            return Err(err);
        }

        self.current_offset += batch.len() as u64;
        Ok(offset)
    }

    fn write_synced(&mut self, batch: &[u8], count: usize) -> StorageResult<()> {
        self.file.write_all(batch).map_err(|e| {
            StorageError::write_failed(format!("Failed to append {} records", count), e)
        })?;
        self.file
            .sync_all()
            .map_err(|e| StorageError::write_failed("fsync failed after appending records", e))
    }

    /// Drops everything past `offset` and makes the cut durable.
    fn truncate_to(&mut self, offset: u64) -> std::io::Result<()> {
        self.file.set_len(offset)?;
        self.file.sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Substance;
    use crate::storage::LogReader;
    use tempfile::TempDir;

    fn substance(name: &str) -> Record {
        Record::Substance(Substance::new(name, "Oak", "Living organism"))
    }

    #[test]
    fn test_append_advances_offset() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(temp_dir.path()).unwrap();

        let first = writer.append(&[substance("Tree-001")]).unwrap();
        assert_eq!(first, 0);
        let end = writer.current_offset();
        assert!(end > 0);
        assert_eq!(fs::metadata(log_path(temp_dir.path())).unwrap().len(), end);

        assert_eq!(writer.append(&[]).unwrap(), end);
    }

    #[test]
    fn test_reopen_resumes_at_end_of_log() {
        let temp_dir = TempDir::new().unwrap();
        let end = {
            let mut writer = LogWriter::open(temp_dir.path()).unwrap();
            writer.append(&[substance("Tree-001"), substance("Tree-002")]).unwrap();
            writer.current_offset()
        };
        assert_eq!(LogWriter::open(temp_dir.path()).unwrap().current_offset(), end);
    }

    #[test]
    fn test_torn_tail_rolled_back() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = LogWriter::open(temp_dir.path()).unwrap();
        writer.append(&[substance("Tree-001")]).unwrap();
        let committed = writer.current_offset();

        // Half a frame reaches the file, as after a failed write_all.
        let frame = substance("Tree-002").encode_frame().unwrap();
        writer.file.write_all(&frame[..frame.len() / 2]).unwrap();
        writer.truncate_to(committed).unwrap();

        writer.append(&[substance("Tree-003")]).unwrap();

        let mut reader = LogReader::open(&log_path(temp_dir.path())).unwrap();
        let mut names = Vec::new();
        while let Some(record) = reader.read_next().unwrap() {
            if let Record::Substance(s) = record {
                names.push(s.name);
            }
        }
        assert_eq!(names, vec!["Tree-001", "Tree-003"]);
    }
}
