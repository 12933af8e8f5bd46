//! Candidate identity collection across all documents of a case

use tracing::{debug, info};

use core_kernel::{CaseId, DocumentId};

use crate::candidate::CandidateIdentity;
use crate::document::StructuredDocument;
use crate::error::CollectError;
use crate::extraction::DocumentFieldExtractor;

/// Runs the extractor over every document of a case
///
/// Output follows document input order and is not deduplicated across
/// documents; later stages rely on that order when picking the first or
/// last candidate.
#[derive(Debug, Clone, Default)]
pub struct CandidateIdentityCollector {
    extractor: DocumentFieldExtractor,
}

impl CandidateIdentityCollector {
    pub fn new(extractor: DocumentFieldExtractor) -> Self {
        Self { extractor }
    }

    /// Collects candidates from `documents` in the order given
    ///
    /// # Errors
    ///
    /// The first document that fails extraction aborts collection.
    pub fn collect(
        &self,
        case_id: &CaseId,
        documents: &[(DocumentId, StructuredDocument)],
    ) -> Result<Vec<CandidateIdentity>, CollectError> {
        let mut candidates = Vec::new();

        for (document_id, document) in documents {
            let found = self.extractor.extract(document).map_err(|source| CollectError {
                document_id: document_id.clone(),
                source,
            })?;

            debug!(
                %case_id,
                %document_id,
                document_type = %document.document_type,
                candidates = found.len(),
                "document scanned"
            );
            candidates.extend(found);
        }

        info!(%case_id, documents = documents.len(), candidates = candidates.len(), "candidate identities collected");
        Ok(candidates)
    }
}
