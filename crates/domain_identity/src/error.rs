//! Identity domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{CaseId, CaseType, PortError};

/// Errors that can occur while resolving identities
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Every registry hit was rejected, so the case has no usable person
    #[error("No identity could be resolved for case {case_id}")]
    IdentityNotFound { case_id: CaseId },

    /// A single-actor case type resolved to several insured persons
    #[error("Case type {case_type} allows one insured person, resolved {count}")]
    AmbiguousIdentity { case_type: CaseType, count: usize },

    /// Identifier-encoded birthdate disagrees with another source
    #[error("Birthdate {other} from {source_name} does not match {encoded} encoded in {masked_id}")]
    BirthdateMismatch {
        masked_id: String,
        encoded: NaiveDate,
        other: NaiveDate,
        source_name: &'static str,
    },

    /// A collaborator failed for a reason other than "not found"
    #[error("Identity collaborator failed: {0}")]
    Port(#[from] PortError),
}

impl IdentityError {
    /// True for errors the caller must treat as fatal for the event
    pub fn is_fatal(&self) -> bool {
        !matches!(self, IdentityError::BirthdateMismatch { .. })
    }
}
