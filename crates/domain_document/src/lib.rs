//! Structured Document Domain
//!
//! This crate reads identifying information out of case documents (SEDs).
//!
//! # Flow
//!
//! ```text
//! [StructuredDocument] -> DocumentFieldExtractor -> [CandidateIdentity]
//!         (per case)   -> CandidateIdentityCollector (document order kept)
//! ```
//!
//! Candidates are unverified: resolution against the person registry
//! happens in `domain_identity`.

pub mod document;
pub mod candidate;
pub mod extraction;
pub mod collector;
pub mod error;
pub mod ports;

pub use document::{
    StructuredDocument, NavBlock, PersonBlock, Person, Pin, ClaimBlock,
    PensionBlock, RecoveryBlock, RecoveryStatus, RelationToDeceased,
};
pub use candidate::{CandidateIdentity, SearchFallback};
pub use extraction::{DocumentFieldExtractor, ExtractionRule};
pub use collector::CandidateIdentityCollector;
pub use error::{CollectError, DocumentError};
pub use ports::DocumentStore;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryDocumentStore;
