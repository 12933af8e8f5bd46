//! Candidate identities found in documents
//!
//! A candidate is what one person block in one document says about a
//! person. Nothing here has been checked against the registry yet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{BenefitType, DocumentType, NationalId, RelationTag};

/// Name and birthdate for a registry search when no usable pin exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFallback {
    pub name: String,
    pub birthdate: NaiveDate,
}

/// One person reference extracted from a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateIdentity {
    pub id: Option<NationalId>,
    pub relation: RelationTag,
    pub benefit_type_hint: Option<BenefitType>,
    pub source_document_type: DocumentType,
    /// Birthdate as written in the document content
    pub birthdate: Option<NaiveDate>,
    pub search_fallback: Option<SearchFallback>,
}

impl CandidateIdentity {
    /// Creates a candidate carrying a national id
    pub fn with_id(id: NationalId, relation: RelationTag, source_document_type: DocumentType) -> Self {
        Self {
            id: Some(id),
            relation,
            benefit_type_hint: None,
            source_document_type,
            birthdate: None,
            search_fallback: None,
        }
    }

    /// Sets the benefit type hint
    pub fn hint(mut self, benefit_type: Option<BenefitType>) -> Self {
        self.benefit_type_hint = benefit_type;
        self
    }

    /// True when the candidate can be looked up by id or searched by name
    pub fn is_resolvable(&self) -> bool {
        self.id.is_some() || self.search_fallback.is_some()
    }
}
