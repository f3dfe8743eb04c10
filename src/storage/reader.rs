//! Sequential reader over the record log
//!
//! Every frame is checksum-verified. Truncation, a bad length prefix, or a
//! checksum mismatch is reported as data corruption.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StorageError, StorageResult};
use super::record::{Record, MIN_FRAME_SIZE};

/// Reader for replaying the record log from the beginning.
pub struct LogReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the record log for reading.
    pub fn open(log_path: &Path) -> StorageResult<Self> {
        let file = File::open(log_path).map_err(|e| {
            StorageError::read_failed(
                format!("Failed to open record log: {}", log_path.display()),
                e,
            )
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StorageError::read_failed("Failed to read log metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Reads the next record.
    ///
    /// - `Ok(Some(record))` if a record was read
    /// - `Ok(None)` at end of log
    /// - `Err(OAAS_DATA_CORRUPTION)` on any framing or checksum failure
    pub fn read_next(&mut self) -> StorageResult<Option<Record>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_FRAME_SIZE as u64 {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Truncated log: {} bytes remaining, minimum frame size is {}",
                    remaining, MIN_FRAME_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StorageError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read frame length: {}", e),
            )
        })?;
        let frame_length = u32::from_le_bytes(len_buf) as u64;

        if frame_length < MIN_FRAME_SIZE as u64 {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!("Invalid frame length: {}", frame_length),
            ));
        }

        if frame_length > remaining {
            return Err(StorageError::corruption_at_offset(
                self.current_offset,
                format!(
                    "Frame length {} exceeds remaining log size {}",
                    frame_length, remaining
                ),
            ));
        }

        let mut frame = vec![0u8; frame_length as usize];
        frame[0..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut frame[4..]).map_err(|e| {
            StorageError::corruption_at_offset(
                self.current_offset,
                format!("Failed to read frame body: {}", e),
            )
        })?;

        let record = Record::decode_frame(&frame, self.current_offset)?;
        self.current_offset += frame_length;

        Ok(Some(record))
    }
}
