//! Document Domain Ports
//!
//! The `DocumentStore` port fetches structured documents from the case
//! system. Fetch mechanics (REST calls, retries) live in the adapter.

use async_trait::async_trait;

use core_kernel::{CaseId, DocumentId, DomainPort, OperationMetadata, PortError};

use crate::document::StructuredDocument;

/// Fetches structured documents belonging to a case
#[async_trait]
pub trait DocumentStore: DomainPort {
    /// Retrieves one document of a case
    ///
    /// # Returns
    ///
    /// The document, `PortError::NotFound` if the case has no such
    /// document, or another `PortError` if the store is unavailable
    async fn fetch(
        &self,
        case_id: &CaseId,
        document_id: &DocumentId,
        metadata: Option<OperationMetadata>,
    ) -> Result<StructuredDocument, PortError>;
}

/// Mock implementation of DocumentStore for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// In-memory document store keyed by case and document id
    #[derive(Debug, Default)]
    pub struct InMemoryDocumentStore {
        documents: HashMap<(CaseId, DocumentId), StructuredDocument>,
    }

    impl InMemoryDocumentStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a document, builder style
        pub fn with_document(
            mut self,
            case_id: impl Into<CaseId>,
            document_id: impl Into<DocumentId>,
            document: StructuredDocument,
        ) -> Self {
            self.documents.insert((case_id.into(), document_id.into()), document);
            self
        }
    }

    impl DomainPort for InMemoryDocumentStore {}

    #[async_trait]
    impl DocumentStore for InMemoryDocumentStore {
        async fn fetch(
            &self,
            case_id: &CaseId,
            document_id: &DocumentId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<StructuredDocument, PortError> {
            self.documents
                .get(&(case_id.clone(), document_id.clone()))
                .cloned()
                .ok_or_else(|| PortError::not_found("Document", document_id))
        }
    }
}
