//! Core Kernel - Foundational types for pension case journaling
//!
//! This crate provides the building blocks used across all domain crates:
//! - Validated Norwegian national identifiers
//! - Shared code vocabularies (case, document, benefit and relation types)
//! - String identifiers for actors, cases and documents
//! - Port error types and the injected metrics port

pub mod national_id;
pub mod codes;
pub mod identifiers;
pub mod temporal;
pub mod ports;
pub mod metrics;
pub mod error;

pub use national_id::{NationalId, NationalIdError};
pub use codes::{BenefitType, CaseStatus, CaseType, DocumentType, EventType, RelationTag, UnknownCode};
pub use identifiers::{ActorId, CaseId, DocumentId, PensionCaseId, ProcessingId};
pub use temporal::{age_on, parse_document_date};
pub use ports::{DomainPort, OperationMetadata, PortError};
pub use metrics::{MetricsPort, NoopMetrics, TracingMetrics};
pub use error::CoreError;
