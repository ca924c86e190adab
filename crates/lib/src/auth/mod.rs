//! Credential storage and password verification.
//!
//! Credentials live in an external JSON file mapping usernames to Argon2id
//! PHC hash strings. The file is re-read on every verification so external
//! rotation takes effect without a restart. This module never writes the
//! file; provisioning is an operational concern handled out of band.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

pub mod crypto;
pub mod errors;

pub use errors::AuthError;

use crate::Result;

/// Read-only view over the credential file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store over the given credential file path.
    ///
    /// The path is not touched here; callers that need an early failure for
    /// a missing or broken file should call [`load`](Self::load) once at
    /// startup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the username → hash mapping from the credential file.
    ///
    /// Fails with [`AuthError::Unreadable`] when the file cannot be read and
    /// [`AuthError::Malformed`] when its contents are not a JSON object of
    /// strings.
    pub async fn load(&self) -> Result<HashMap<String, String>> {
        let bytes =
            tokio::fs::read(&self.path)
                .await
                .map_err(|source| AuthError::Unreadable {
                    path: self.path.clone(),
                    source,
                })?;

        let credentials =
            serde_json::from_slice(&bytes).map_err(|source| AuthError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        Ok(credentials)
    }

    /// Verify a username/password pair against the current file contents.
    ///
    /// Re-reads the file on every call. Unknown usernames and wrong or
    /// unverifiable passwords are `Ok(false)`; `Err` means the credential
    /// file itself could not be loaded.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool> {
        let credentials = self.load().await?;

        let Some(hash) = credentials.get(username) else {
            return Ok(false);
        };

        Ok(crypto::verify_password(password, hash))
    }
}
