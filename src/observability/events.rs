//! Observable lifecycle events
//!
//! Events are explicit and typed; the logged name is the SCREAMING_SNAKE
//! form returned by `as_str`.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    BootStart,
    BootComplete,
    ShutdownStart,
    ShutdownComplete,
    ConfigLoaded,

    // Store
    StoreOpened,
    /// Record log could not be replayed (FATAL)
    StoreCorruption,

    // Transition engine
    PotentialityCreated,
    ReadinessChecked,
    ActualizationCommitted,
    ActualizationRejected,

    // Causal graph
    CausalRelationAdded,

    // Server
    Serving,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "OAAS_STARTUP_BEGIN",
            Event::BootComplete => "OAAS_STARTUP_COMPLETE",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::StoreOpened => "STORE_OPENED",
            Event::StoreCorruption => "STORE_CORRUPTION",

            Event::PotentialityCreated => "POTENTIALITY_CREATED",
            Event::ReadinessChecked => "READINESS_CHECKED",
            Event::ActualizationCommitted => "ACTUALIZATION_COMMITTED",
            Event::ActualizationRejected => "ACTUALIZATION_REJECTED",

            Event::CausalRelationAdded => "CAUSAL_RELATION_ADDED",

            Event::Serving => "OAAS_SERVING",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::StoreCorruption)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_screaming_snake() {
        let events = [
            Event::BootStart,
            Event::BootComplete,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::ConfigLoaded,
            Event::StoreOpened,
            Event::StoreCorruption,
            Event::PotentialityCreated,
            Event::ReadinessChecked,
            Event::ActualizationCommitted,
            Event::ActualizationRejected,
            Event::CausalRelationAdded,
            Event::Serving,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", s);
        }
    }

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(Event::StoreCorruption.is_fatal());
        assert!(!Event::ActualizationRejected.is_fatal());
    }
}
