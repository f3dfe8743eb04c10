//! Operational counters
//!
//! - Counters only, monotonic
//! - Reset only on process start
//! - Relaxed atomics; exactness per counter, not across counters

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct MetricsRegistry {
    potentialities_created: AtomicU64,
    readiness_checks: AtomicU64,
    actualizations_committed: AtomicU64,
    actualizations_rejected: AtomicU64,
    causal_relations_added: AtomicU64,
    records_written: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_potentialities_created(&self) {
        self.potentialities_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_readiness_checks(&self) {
        self.readiness_checks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_actualizations_committed(&self) {
        self.actualizations_committed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_actualizations_rejected(&self) {
        self.actualizations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_causal_relations_added(&self) {
        self.causal_relations_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_records_written(&self, count: u64) {
        self.records_written.fetch_add(count, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            potentialities_created: self.potentialities_created.load(Ordering::Relaxed),
            readiness_checks: self.readiness_checks.load(Ordering::Relaxed),
            actualizations_committed: self.actualizations_committed.load(Ordering::Relaxed),
            actualizations_rejected: self.actualizations_rejected.load(Ordering::Relaxed),
            causal_relations_added: self.causal_relations_added.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self.snapshot()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub potentialities_created: u64,
    pub readiness_checks: u64,
    pub actualizations_committed: u64,
    pub actualizations_rejected: u64,
    pub causal_relations_added: u64,
    pub records_written: u64,
}
