//! Record log entries and their on-disk framing
//!
//! Frame format:
//!
//! ```text
//! +------------------+
//! | Frame Length     | (u32 LE, includes itself and the checksum)
//! +------------------+
//! | Record Body      | (JSON-encoded `Record`)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32 over length + body)
//! +------------------+
//! ```

use serde::{Deserialize, Serialize};

use super::checksum::{compute_checksum, verify_checksum};
use super::errors::{StorageError, StorageResult};
use crate::model::{Actuality, Attribute, CausalRelation, Kind, Mode, Potentiality, Substance};

/// Smallest possible frame: length + empty body + checksum
pub const MIN_FRAME_SIZE: usize = 4 + 4;

/// One entry in the append-only record log.
///
/// The log is the sequence of every committed change; replaying it in
/// order rebuilds the in-memory tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", content = "data", rename_all = "snake_case")]
pub enum Record {
    Substance(Substance),
    /// Replaces the descriptive fields of an existing substance
    SubstanceUpdated(Substance),
    SubstanceDeleted { id: String },
    Kind(Kind),
    Attribute(Attribute),
    Mode(Mode),
    Potentiality(Potentiality),
    Actuality(Actuality),
    CausalRelation(CausalRelation),
}

impl Record {
    /// Short label for logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            Record::Substance(_) => "substance",
            Record::SubstanceUpdated(_) => "substance_updated",
            Record::SubstanceDeleted { .. } => "substance_deleted",
            Record::Kind(_) => "kind",
            Record::Attribute(_) => "attribute",
            Record::Mode(_) => "mode",
            Record::Potentiality(_) => "potentiality",
            Record::Actuality(_) => "actuality",
            Record::CausalRelation(_) => "causal_relation",
        }
    }

    /// Serialize the record into a checksummed frame.
    pub fn encode_frame(&self) -> StorageResult<Vec<u8>> {
        let body = serde_json::to_vec(self).map_err(|e| {
            StorageError::write_failed_no_source(format!(
                "Failed to encode {} record: {}",
                self.label(),
                e
            ))
        })?;

        let frame_length = (MIN_FRAME_SIZE + body.len()) as u32;

        let mut frame = Vec::with_capacity(frame_length as usize);
        frame.extend_from_slice(&frame_length.to_le_bytes());
        frame.extend_from_slice(&body);
        let checksum = compute_checksum(&frame);
        frame.extend_from_slice(&checksum.to_le_bytes());

        Ok(frame)
    }

    /// Decode a complete frame, verifying its checksum.
    ///
    /// `offset` is only used for error context.
    pub fn decode_frame(frame: &[u8], offset: u64) -> StorageResult<Self> {
        if frame.len() < MIN_FRAME_SIZE {
            return Err(StorageError::corruption_at_offset(
                offset,
                format!("Frame too short: {} bytes", frame.len()),
            ));
        }

        let split = frame.len() - 4;
        let (covered, tail) = frame.split_at(split);
        let stored = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);

        if !verify_checksum(covered, stored) {
            return Err(StorageError::corruption_at_offset(
                offset,
                "Record checksum mismatch",
            ));
        }

        serde_json::from_slice(&covered[4..]).map_err(|e| {
            StorageError::corruption_at_offset(offset, format!("Undecodable record body: {}", e))
        })
    }
}
