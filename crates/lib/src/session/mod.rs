//! Session state and the token-indexed session store.
//!
//! A [`Session`] is plain state: an optional authenticated username plus an
//! optional one-shot flash message. No I/O happens here. The [`SessionStore`]
//! maps cookie-borne UUID tokens to shared session handles that the HTTP
//! layer resolves once per request. Sessions are ephemeral and lost on
//! server restart.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (UUID stored in a cookie)
pub type SessionToken = String;

/// Shared handle to one client's session state.
pub type SessionHandle = Arc<RwLock<Session>>;

/// Per-client session state: authenticated identity plus a pending flash.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    username: Option<String>,
    flash: Option<String>,
}

impl Session {
    /// Create a fresh anonymous session with no pending flash.
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.username.as_deref().is_some_and(|name| !name.is_empty())
    }

    /// The signed-in username, if any.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Mark the session authenticated as `username`.
    pub fn sign_in(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
    }

    /// Drop the authenticated identity.
    ///
    /// The pending flash is untouched, so a farewell message queued alongside
    /// sign-out still shows on the next page.
    pub fn sign_out(&mut self) {
        self.username = None;
    }

    /// Queue a flash message, replacing any pending one.
    pub fn set_flash(&mut self, message: impl Into<String>) {
        self.flash = Some(message.into());
    }

    /// Take the pending flash message, clearing it.
    ///
    /// One-shot: a message set during one request is returned by exactly the
    /// next call, and a second consecutive call returns `None`.
    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }
}

/// In-memory session store
///
/// Maps session tokens (UUIDs) to session handles. Handles are shared so
/// concurrent requests from the same client observe one session.
///
/// The store only grows on its own: entries persist until [`destroy`] removes
/// them or the process exits. Callers that mint a session per cookie-less
/// request accept that growth.
///
/// [`destroy`]: SessionStore::destroy
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, SessionHandle>>>,
}

impl SessionStore {
    /// Create a new empty session store
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a fresh anonymous session
    ///
    /// Generates a random UUID token and stores a new session under it.
    ///
    /// # Returns
    /// The session token (to be stored in a cookie) and the session handle
    pub async fn create(&self) -> (SessionToken, SessionHandle) {
        let token = Uuid::new_v4().to_string();
        let handle: SessionHandle = Arc::new(RwLock::new(Session::new()));
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), handle.clone());
        (token, handle)
    }

    /// Resolve a session token to its handle
    ///
    /// # Arguments
    /// * `token` - The session token from the cookie
    ///
    /// # Returns
    /// The session handle if the token is known, None otherwise
    pub async fn resolve(&self, token: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Destroy a session
    ///
    /// Removes the session from the store. Signing out does not destroy a
    /// session; this exists for external expiry.
    ///
    /// # Arguments
    /// * `token` - The session token to destroy
    pub async fn destroy(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Get the number of active sessions (for debugging)
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
