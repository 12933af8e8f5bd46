//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! pension journaling test suite.
//!
//! # Modules
//!
//! - `fixtures`: Known-good national ids, documents and registry records
//! - `builders`: Builder patterns for documents and registry records
//! - `metrics`: A metrics port that records increments for assertions
//! - `assertions`: Assertion helpers for routing decisions and identities
//! - `generators`: Property-based test data generators
//!
//! The in-memory port adapters of the domain crates are re-exported so
//! tests need a single import.

pub mod fixtures;
pub mod builders;
pub mod metrics;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use metrics::*;
pub use assertions::*;
pub use generators::*;

pub use domain_document::InMemoryDocumentStore;
pub use domain_identity::{InMemoryPersonRegistry, StaticConfidentiality};
pub use domain_routing::InMemoryCaseRecordStore;
