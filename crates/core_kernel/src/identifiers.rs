//! Strongly-typed identifiers for external system keys
//!
//! Actor ids, case ids and document ids all arrive as opaque strings from
//! the registries and the case system. Newtype wrappers keep them from being
//! mixed up and give every id a uniform blank check.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from any string-like value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is empty or whitespace only
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Returns the identifier label used in log and error output
            pub fn label() -> &'static str {
                $label
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

// Person registry identifiers
define_id!(ActorId, "actor");

// Case system identifiers
define_id!(CaseId, "case");
define_id!(DocumentId, "document");
define_id!(PensionCaseId, "pension case");

/// Identifier for one processing run of an inbound event
///
/// Time-ordered so log lines for consecutive events sort naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessingId(Uuid);

impl ProcessingId {
    /// Creates a new time-ordered identifier (v7)
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProcessingId {
    fn default() -> Self {
        Self::new_v7()
    }
}

impl fmt::Display for ProcessingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PRC-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(ActorId::new("").is_blank());
        assert!(ActorId::new("   ").is_blank());
        assert!(!ActorId::new("1000101917358").is_blank());
    }

    #[test]
    fn test_display_is_raw_value() {
        let id = CaseId::new("147729");
        assert_eq!(id.to_string(), "147729");
        assert_eq!(CaseId::label(), "case");
    }

    #[test]
    fn test_processing_id_display() {
        let id = ProcessingId::new_v7();
        assert!(id.to_string().starts_with("PRC-"));
    }
}
