use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use http::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tracing::warn;

use crate::error::ClientError;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key/value persistence backing the session store.
pub trait TokenStorage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn write(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// Process-local storage. Used during server-side rendering and in tests.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("memory storage poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("memory storage poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ClientError::Storage("memory storage poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Holds at most one bearer token and turns it into request headers.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new<S: TokenStorage + 'static>(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// The stored token. Empty values and unreadable storage count as absent.
    pub fn token(&self) -> Option<String> {
        match self.storage.read(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("failed to read session token: {e}");
                None
            }
        }
    }

    pub fn set_token(&self, token: &str) -> Result<(), ClientError> {
        self.storage.write(TOKEN_KEY, token)
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        self.storage.remove(TOKEN_KEY)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// `Authorization: Bearer <token>` when a token is stored, otherwise empty.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(e) => warn!("stored session token is not a valid header value: {e}"),
            }
        }
        headers
    }
}
