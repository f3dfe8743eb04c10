//! Begin/complete bracketing for multi-step operations
//!
//! `{NAME}_BEGIN` is logged on creation. Exactly one of `{NAME}_COMPLETE`,
//! `{NAME}_FAILED` or `{NAME}_INCOMPLETE` (on drop) follows.

use std::time::Instant;

use super::logger::{Logger, Severity};

pub struct ObservationScope {
    name: String,
    fields: Vec<(String, String)>,
    started: Instant,
    finished: bool,
}

impl ObservationScope {
    pub fn new(name: &str) -> Self {
        Self::with_fields(name, &[])
    }

    pub fn with_fields(name: &str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    /// Logs `{NAME}_COMPLETE` with the opening fields, `extra` and `duration_ms`.
    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.finish(Severity::Info, "COMPLETE", extra);
    }

    pub fn fail(mut self, reason: &str) {
        self.finish(Severity::Error, "FAILED", &[("reason", reason)]);
    }

    pub fn fail_fatal(mut self, reason: &str) {
        self.finish(Severity::Fatal, "FAILED", &[("reason", reason)]);
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }

    fn finish(&mut self, severity: Severity, suffix: &str, extra: &[(&str, &str)]) {
        self.finished = true;
        let duration = self.elapsed_ms().to_string();
        let mut fields: Vec<(&str, &str)> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        fields.extend_from_slice(extra);
        fields.push(("duration_ms", &duration));
        Logger::log(severity, &format!("{}_{}", self.name, suffix), &fields);
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("reason", "scope dropped without completion")],
            );
        }
    }
}
