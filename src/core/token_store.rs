//! Single-slot persistent storage for the bearer token.

use std::sync::{Mutex, PoisonError};

/// One persistent slot holding the session's bearer token.
///
/// Implementations never fail loudly: a storage error is logged and the
/// slot behaves as empty.
pub trait TokenStore: Send + Sync {
    /// Stored token, if any. An empty string counts as no token.
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str);

    fn clear(&self);

    fn has_token(&self) -> bool {
        self.get().is_some()
    }
}

/// In-process token slot, used during server rendering and in tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Token slot backed by `window.localStorage`, scoped to the page origin
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
impl BrowserTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::warn!(error = ?err, "localStorage unavailable");
                None
            }
        }
    }
}

#[cfg(feature = "hydrate")]
impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        let storage = Self::storage()?;
        storage
            .get_item(super::config::TOKEN_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(err) = storage.set_item(super::config::TOKEN_STORAGE_KEY, token) {
                tracing::warn!(error = ?err, "failed to persist auth token");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if let Err(err) = storage.remove_item(super::config::TOKEN_STORAGE_KEY) {
                tracing::warn!(error = ?err, "failed to remove auth token");
            }
        }
    }
}
