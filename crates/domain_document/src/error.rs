//! Document domain errors

use thiserror::Error;

use core_kernel::DocumentId;

/// Errors raised while reading identities out of a single document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// A field the document type requires is structurally absent
    #[error("Document {document_type} is missing required field {field}")]
    DocumentParse {
        document_type: String,
        field: &'static str,
    },

    /// The document payload could not be deserialised
    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl DocumentError {
    pub fn missing(document_type: impl Into<String>, field: &'static str) -> Self {
        DocumentError::DocumentParse {
            document_type: document_type.into(),
            field,
        }
    }
}

/// A document error tagged with the document that caused it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Document {document_id}: {source}")]
pub struct CollectError {
    pub document_id: DocumentId,
    #[source]
    pub source: DocumentError,
}
