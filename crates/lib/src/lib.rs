//!
//! Vellum: a small file-backed content management service.
//! This library provides the core components; the HTTP surface lives in the
//! `vellum-bin` crate and is a thin layer of route handlers over this API.
//!
//! ## Core Concepts
//!
//! * **Documents (`document::DocumentStore`)**: Named, flat file resources under a
//!   single storage root. The store enumerates, reads, writes, creates, and deletes
//!   them; every call reflects current on-disk state.
//! * **Formats (`document::Format`)**: A closed classification derived from the
//!   filename suffix. Markdown is rendered to HTML; everything else is plain text.
//! * **Rendering (`render::Renderer`)**: Dispatches raw document bytes by format.
//!   The markdown engine and the page layout are pluggable collaborators.
//! * **Credentials (`auth::CredentialStore`)**: A username → password-hash mapping
//!   loaded from an external file, re-read on every verification.
//! * **Sessions (`session::SessionStore`)**: Per-client authenticated identity plus
//!   a one-shot flash message, resolved per request by cookie token.
//!
//! ## Example
//!
//! ```no_run
//! use vellum::{DocumentStore, document::Format};
//!
//! # async fn demo() -> vellum::Result<()> {
//! let store = DocumentStore::new("data");
//! let name = store.create("welcome").await?;
//! assert_eq!(name, "welcome.txt");
//! assert_eq!(Format::from_name(&name), Format::PlainText);
//! store.write(&name, b"Hello.").await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod document;
pub mod render;
pub mod session;

// Re-export the main types for easier access.
pub use auth::CredentialStore;
pub use document::{DocumentStore, Format};
pub use render::Renderer;
pub use session::{Session, SessionStore};

/// Result type used throughout the vellum library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the vellum library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured document repository errors from the document module
    #[error(transparent)]
    Document(document::DocumentError),

    /// Structured credential errors from the auth module
    #[error(transparent)]
    Auth(auth::AuthError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Document(_) => "document",
            Error::Auth(_) => "auth",
        }
    }

    /// Check if this error indicates a requested document was absent.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Document(doc_err) => doc_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates an empty or unsafe document name.
    pub fn is_invalid_name(&self) -> bool {
        match self {
            Error::Document(doc_err) => doc_err.is_invalid_name(),
            _ => false,
        }
    }

    /// Check if this error means the credential resource could not be loaded.
    pub fn is_unreadable(&self) -> bool {
        match self {
            Error::Auth(auth_err) => auth_err.is_unreadable(),
            _ => false,
        }
    }
}
