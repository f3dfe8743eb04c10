//! Observability for oaas
//!
//! - Structured JSON logging, one line per event
//! - Monotonic operational counters
//! - Begin/complete scopes for multi-step work
//!
//! Observability is read-only: a failure to log never fails an operation.
//!
//! ```ignore
//! use oaas::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::ActualizationCommitted, &[("potentiality_id", "p-1")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_actualizations_committed();
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::ObservationScope;

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}

/// Log an event at an explicit severity, e.g. a rejection at WARN.
pub fn log_event_at(severity: Severity, event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity, event.as_str(), fields);
}
