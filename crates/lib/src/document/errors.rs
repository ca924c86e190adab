//! Error types for the document repository.

use thiserror::Error;

/// Errors that can occur during document repository operations.
///
/// Helper methods like `is_*()` provide stable classification for callers
/// that map errors onto user-visible behavior.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Requested document is absent from the storage root.
    #[error("Document not found: {name}")]
    NotFound {
        /// The name of the document that was not found
        name: String,
    },

    /// Supplied name is empty or reduces to no usable file name.
    #[error("Invalid document name: {name:?}")]
    InvalidName {
        /// The name as supplied by the caller
        name: String,
    },
}

impl DocumentError {
    /// Check if this error indicates the document was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocumentError::NotFound { .. })
    }

    /// Check if this error indicates an unusable document name.
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, DocumentError::InvalidName { .. })
    }
}

// Conversion from DocumentError to the main Error type
impl From<DocumentError> for crate::Error {
    fn from(err: DocumentError) -> Self {
        crate::Error::Document(err)
    }
}
