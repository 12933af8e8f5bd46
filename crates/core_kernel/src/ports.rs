//! Collaborator port primitives
//!
//! Each domain crate declares its own port traits (document store, person
//! registry, confidentiality check, pension case store). They all share the
//! marker trait, the error type and the call metadata defined here.
//!
//! ```text
//!   JournalingService
//!          │
//!          ▼
//!   port traits (domain crates) ◄── REST / messaging adapters
//!                               ◄── in-memory adapters (mock feature)
//! ```
//!
//! Timeouts, retries and backoff live in the adapters. The core only tells
//! "not found" apart from a broken collaborator.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Failure reported by a collaborator port
#[derive(Debug, Error)]
pub enum PortError {
    /// The collaborator has no such entity
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Connection to {service} failed: {message}")]
    Connection { service: String, message: String },

    #[error("{operation} timed out after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },

    #[error("{service} is unavailable")]
    ServiceUnavailable { service: String },

    /// A collaborator answered with a payload the core cannot map
    #[error("Unexpected payload from {service}: {message}")]
    Transformation { service: String, message: String },
}

impl PortError {
    /// `id` is rendered with `Display`; pass a masked value for person ids
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn connection(service: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::Connection {
            service: service.into(),
            message: message.into(),
        }
    }

    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn transformation(service: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::Transformation {
            service: service.into(),
            message: message.into(),
        }
    }

    /// True when the same call may succeed later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. } | PortError::Timeout { .. } | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker for every collaborator port
///
/// Ports are shared as `Arc<dyn ...>` between events of different cases.
pub trait DomainPort: Send + Sync + 'static {}

/// Per-call metadata passed to every port
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationMetadata {
    /// Id tying all collaborator calls of one event together
    pub correlation_id: Option<String>,
    pub context: HashMap<String, String>,
}

impl OperationMetadata {
    pub fn with_correlation_id(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: Some(correlation_id.into()),
            context: HashMap::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_not_transient() {
        let error = PortError::not_found("Person", "110671*****");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert_eq!(error.to_string(), "Person not found: 110671*****");
    }

    #[test]
    fn test_outages_are_transient() {
        let timeout = PortError::Timeout {
            operation: "person lookup".to_string(),
            duration_ms: 5000,
        };
        assert!(timeout.is_transient());
        assert!(PortError::unavailable("person-registry").is_transient());
        assert!(PortError::connection("case-records", "reset by peer").is_transient());
        assert!(!PortError::transformation("documents", "missing sed field").is_transient());
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::with_correlation_id("PRC-1").with_context("case_id", "147729");

        assert_eq!(metadata.correlation_id.as_deref(), Some("PRC-1"));
        assert_eq!(metadata.context.get("case_id").map(String::as_str), Some("147729"));
    }
}
