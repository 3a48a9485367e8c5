//! # Persisted session
//!
//! The signed-in identity is a [`Session`]: an opaque bearer token plus the
//! email used to sign in. Both are present or both are absent.
//!
//! Sessions are persisted through a [`KeyValueStore`] under a single key
//! ([`PERSIST_KEY`]) holding `{"auth": {...}}`. [`SessionPersistence`] is the
//! typed layer over the raw store, the same way a repository sits on top of an
//! object store. Implementations:
//!
//! | Store | Platform |
//! |-------|----------|
//! | [`crate::MemoryStore`] | tests, server-side rendering |
//! | [`crate::FileStore`] | desktop / native |
//! | [`crate::LocalStorageStore`] | browser (`web` feature on wasm32) |
//!
//! Loading never fails the caller: unreadable or half-populated data degrades
//! to a signed-out session.

use serde::{Deserialize, Serialize};

/// Storage key of the persisted state.
pub const PERSIST_KEY: &str = "persist:root";

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("persisted state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

/// Raw string storage keyed by name.
pub trait KeyValueStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, SessionStoreError>>;
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>>;
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), SessionStoreError>>;
}

/// Signed-in identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl Session {
    pub fn signed_in(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            email: Some(email.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Drop half-populated state.
    fn normalized(self) -> Self {
        if self.token.is_some() && self.email.is_some() {
            self
        } else {
            Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.email.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|_| self.email.is_some())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|_| self.token.is_some())
    }

    /// Header badge text: first three characters of the email, upper-cased.
    pub fn initials(&self) -> String {
        self.email()
            .map(|e| e.chars().take(3).collect::<String>().to_uppercase())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    auth: Session,
}

/// Typed access to the persisted session.
#[derive(Clone, Debug)]
pub struct SessionPersistence<S> {
    store: S,
}

impl<S: KeyValueStore> SessionPersistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Rehydrate the session. Any failure yields a signed-out session.
    pub async fn load(&self) -> Session {
        let raw = match self.store.get(PERSIST_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Session::signed_out(),
            Err(e) => {
                tracing::warn!("Failed to read persisted session: {e}");
                return Session::signed_out();
            }
        };
        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) => state.auth.normalized(),
            Err(e) => {
                tracing::warn!("Discarding unreadable persisted session: {e}");
                Session::signed_out()
            }
        }
    }

    pub async fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        let state = PersistedState {
            auth: session.clone(),
        };
        let raw = serde_json::to_string(&state)?;
        self.store.set(PERSIST_KEY, &raw).await
    }

    /// Remove the persisted state wholesale.
    pub async fn clear(&self) -> Result<(), SessionStoreError> {
        self.store.remove(PERSIST_KEY).await
    }
}
