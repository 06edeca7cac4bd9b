use std::fmt;
use std::sync::Arc;

use tracing::warn;

use super::store::{MemoryTokenStore, TokenKind, TokenStore};

/// Snapshot of both token slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Token state for one running application.
///
/// Built once at startup and handed to the `ApiClient`. Clone is cheap and
/// every clone sees the same store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Session backed by a `MemoryTokenStore`
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Read a token slot. Empty strings count as absent.
    pub fn token(&self, kind: TokenKind) -> Option<String> {
        self.store.get(kind).filter(|t| !t.is_empty())
    }

    pub fn access_token(&self) -> Option<String> {
        self.token(TokenKind::Access)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.token(TokenKind::Refresh)
    }

    pub fn tokens(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token(),
            refresh_token: self.refresh_token(),
        }
    }

    /// Write a single token slot
    pub fn set_token(&self, kind: TokenKind, token: &str) {
        if let Err(e) = self.store.set(kind, token) {
            warn!(error = %e, key = kind.key(), "Failed to persist token");
        }
    }

    /// Store a freshly issued access/refresh pair
    pub fn store_pair(&self, access: &str, refresh: &str) {
        self.set_token(TokenKind::Access, access);
        self.set_token(TokenKind::Refresh, refresh);
    }

    /// Remove both tokens
    pub fn clear(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted tokens");
        }
    }

    /// True iff an access token is present. Does not check validity or expiry.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
