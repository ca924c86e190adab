//! Document repository backed by a flat directory.
//!
//! Each document is a single regular file directly under the configured storage
//! root; subdirectories are never addressed. Whatever name a caller supplies is
//! reduced to its final path component before it touches disk, so repository
//! operations cannot escape the root regardless of traversal attempts.
//!
//! There is no caching layer and no locking: every operation goes straight to
//! the filesystem and reflects current on-disk state, and concurrent writes to
//! the same name are last-writer-wins.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub mod errors;

pub use errors::DocumentError;

use crate::Result;

/// Suffix appended to created documents that carry no extension.
pub const PLAIN_TEXT_EXTENSION: &str = "txt";

/// Document format, classified from the filename suffix.
///
/// The classification is total: anything that is not Markdown is served as
/// plain text, so documents with unrecognized suffixes still get a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Served verbatim as `text/plain`.
    PlainText,
    /// Converted to HTML and wrapped in the page layout.
    Markup,
}

impl Format {
    /// Classify a document name by its suffix.
    pub fn from_name(name: &str) -> Self {
        match Path::new(name).extension().and_then(|ext| ext.to_str()) {
            Some("md") | Some("markdown") => Format::Markup,
            _ => Format::PlainText,
        }
    }
}

/// Flat-file document store rooted at a single directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Create a store over the given storage root.
    ///
    /// The root is treated as an opaque path supplied by configuration; it is
    /// not created or validated here.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The configured storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reduce a caller-supplied name to its final path component and join it
    /// to the root. Traversal segments (`..`, leading directories, absolute
    /// prefixes) are stripped rather than rejected; names with no usable
    /// component at all are invalid.
    fn resolve(&self, name: &str) -> Result<(String, PathBuf)> {
        match Path::new(name).file_name().and_then(|base| base.to_str()) {
            Some(base) if !base.is_empty() => {
                let path = self.root.join(base);
                Ok((base.to_string(), path))
            }
            _ => Err(DocumentError::InvalidName {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// List the names of all documents currently under the root, in filesystem
    /// enumeration order. Each call re-enumerates the directory; nothing is
    /// cached between calls.
    ///
    /// Subdirectories and dotfiles are not documents and are skipped.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => names.push(name),
                Ok(_) => {}
                Err(raw) => {
                    tracing::warn!("Skipping non-UTF-8 file name in storage root: {raw:?}");
                }
            }
        }
        Ok(names)
    }

    /// Check whether a document exists. Names that do not reduce to a usable
    /// file name simply do not exist.
    pub async fn exists(&self, name: &str) -> bool {
        match self.resolve(name) {
            Ok((_, path)) => tokio::fs::try_exists(&path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Read a document's raw bytes.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let (base, path) = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DocumentError::NotFound { name: base }.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create or overwrite a document with the given bytes. The content is
    /// stored exactly as supplied.
    pub async fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let (base, path) = self.resolve(name)?;
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(name = %base, bytes = bytes.len(), "wrote document");
        Ok(())
    }

    /// Create an empty document, returning the name it was stored under.
    ///
    /// The supplied name is trimmed first; an empty result is invalid. A name
    /// with no extension gets the plain-text suffix appended, so `"notes"` is
    /// stored as `"notes.txt"`. An existing document of the same name is
    /// truncated, matching `write` semantics for empty content.
    pub async fn create(&self, name: &str) -> Result<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::InvalidName {
                name: name.to_string(),
            }
            .into());
        }

        let (base, _) = self.resolve(trimmed)?;
        let stored = match Path::new(&base).extension() {
            Some(ext) if !ext.is_empty() => base,
            _ => format!("{base}.{PLAIN_TEXT_EXTENSION}"),
        };

        let path = self.root.join(&stored);
        tokio::fs::write(&path, b"").await?;
        tracing::info!(name = %stored, "created document");
        Ok(stored)
    }

    /// Remove a document.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let (base, path) = self.resolve(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(name = %base, "deleted document");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DocumentError::NotFound { name: base }.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}
