//! Journaling Application Layer
//!
//! Wires the document, identity and routing domains into one pipeline per
//! inbound case document event:
//!
//! ```text
//! fetch documents -> collect candidates -> resolve identity
//!     -> look up case record -> route
//! ```
//!
//! The service only owns orchestration. Transport, acknowledgment and the
//! journal entry itself belong to the caller.

pub mod config;
pub mod telemetry;
pub mod service;
pub mod error;

pub use config::{JournalingConfig, LogFormat};
pub use telemetry::init_tracing;
pub use service::{DocumentEvent, JournalingOutcome, JournalingService};
pub use error::JournalingError;
