//! Observable events
//!
//! Events are explicit and typed. Each one carries the severity it is
//! logged at.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,
    /// Model definitions loaded from disk
    ModelsLoaded,
    /// Model definition written to disk
    ModelSaved,

    // Schema
    /// Model type accepted by the registry
    ModelRegistered,
    /// Effective schema composed for a model type
    SchemaComposed,
    /// Field declaration rejected during composition
    ConfigurationRejected,

    // Accessors
    /// Guarded get/set refused an undeclared field
    UnknownFieldRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ModelsLoaded => "MODELS_LOADED",
            Event::ModelSaved => "MODEL_SAVED",
            Event::ModelRegistered => "MODEL_REGISTERED",
            Event::SchemaComposed => "SCHEMA_COMPOSED",
            Event::ConfigurationRejected => "FIELD_CONFIGURATION_REJECTED",
            Event::UnknownFieldRejected => "UNKNOWN_FIELD_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::SchemaComposed => Severity::Trace,
            Event::UnknownFieldRejected => Severity::Warn,
            Event::ConfigurationRejected => Severity::Error,
            _ => Severity::Info,
        }
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
    fn test_all_events_have_string_representation() {
        let events = [
            Event::ConfigLoaded,
            Event::ModelsLoaded,
            Event::ModelSaved,
            Event::ModelRegistered,
            Event::SchemaComposed,
            Event::ConfigurationRejected,
            Event::UnknownFieldRejected,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_severity() {
        assert_eq!(Event::SchemaComposed.severity(), Severity::Trace);
        assert_eq!(Event::UnknownFieldRejected.severity(), Severity::Warn);
        assert_eq!(Event::ConfigurationRejected.severity(), Severity::Error);
        assert_eq!(Event::ModelRegistered.severity(), Severity::Info);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::ModelsLoaded), "MODELS_LOADED");
    }
}
