//! Error types for credential storage and verification.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading credentials or hashing passwords.
///
/// Wrong usernames and wrong passwords are not errors; verification reports
/// those as a plain `false`. These variants cover the credential resource
/// itself becoming unusable.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential file could not be read.
    #[error("Credential file unreadable: {path}")]
    Unreadable {
        /// Path of the credential file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Credential file contents are not the expected JSON mapping.
    #[error("Credential file malformed: {path}")]
    Malformed {
        /// Path of the credential file
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Password hashing failed.
    #[error("Password hashing failed: {reason}")]
    HashingFailed {
        /// Description of the failure reported by the hasher
        reason: String,
    },
}

impl AuthError {
    /// Check if this error means the credential file could not be used.
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            AuthError::Unreadable { .. } | AuthError::Malformed { .. }
        )
    }

    /// Get the credential file path if this error is about one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            AuthError::Unreadable { path, .. } | AuthError::Malformed { path, .. } => Some(path),
            AuthError::HashingFailed { .. } => None,
        }
    }
}

// Conversion from AuthError to the main Error type
impl From<AuthError> for crate::Error {
    fn from(err: AuthError) -> Self {
        crate::Error::Auth(err)
    }
}
