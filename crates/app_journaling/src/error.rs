//! Journaling errors
//!
//! Every variant is fatal for the event. Retry and acknowledgment are up to
//! the caller; `is_retryable` tells collaborator outages apart from business
//! failures.

use thiserror::Error;

use core_kernel::{ActorId, DocumentId, PortError, UnknownCode};
use domain_document::CollectError;
use domain_identity::IdentityError;
use domain_routing::RoutingError;

/// Errors that can occur while processing a document event
#[derive(Debug, Error)]
pub enum JournalingError {
    #[error("Document {document_id} unavailable: {source}")]
    DocumentUnavailable {
        document_id: DocumentId,
        #[source]
        source: PortError,
    },

    #[error("Case record lookup failed for actor {actor_id}: {source}")]
    CaseRecordLookup {
        actor_id: ActorId,
        #[source]
        source: PortError,
    },

    #[error("Unrecognised case type: {0}")]
    UnknownCaseType(#[from] UnknownCode),

    #[error(transparent)]
    Document(#[from] CollectError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

impl JournalingError {
    /// True when a collaborator was temporarily unavailable
    pub fn is_retryable(&self) -> bool {
        match self {
            JournalingError::DocumentUnavailable { source, .. }
            | JournalingError::CaseRecordLookup { source, .. }
            | JournalingError::Identity(IdentityError::Port(source)) => source.is_transient(),
            _ => false,
        }
    }
}
