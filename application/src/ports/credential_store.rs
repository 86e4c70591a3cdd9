//! Credential store port
//!
//! Where the bearer token and the identity it belongs to are kept between
//! runs. Replaces ambient global storage with an injected interface.

use botchat_domain::{AuthToken, StoredCredentials};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Errors raised when credentials cannot be written or removed
#[derive(Error, Debug)]
pub enum CredentialStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistent storage for [`StoredCredentials`]
pub trait CredentialStore: Send + Sync {
    /// Stored credentials, if any. Unreadable storage counts as empty.
    fn get(&self) -> Option<StoredCredentials>;

    fn set(&self, credentials: &StoredCredentials) -> Result<(), CredentialStoreError>;

    fn clear(&self) -> Result<(), CredentialStoreError>;

    /// Stored bearer token, if any
    fn token(&self) -> Option<AuthToken> {
        self.get().map(|credentials| credentials.token)
    }
}

/// Credential store held in memory for the lifetime of the process
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            inner: Mutex::new(Some(credentials)),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Option<StoredCredentials> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, credentials: &StoredCredentials) -> Result<(), CredentialStoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botchat_domain::Identity;

    fn sample() -> StoredCredentials {
        StoredCredentials::new(
            AuthToken::new("abc"),
            Identity::new(1, "ada", "ada@example.com"),
        )
    }

    #[test]
    fn test_in_memory_set_get_clear() {
        let store = InMemoryCredentialStore::new();
        assert!(store.get().is_none());
        assert!(store.token().is_none());

        store.set(&sample()).unwrap();
        assert_eq!(store.get(), Some(sample()));
        assert_eq!(store.token(), Some(AuthToken::new("abc")));

        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_with_credentials_prefills() {
        let store = InMemoryCredentialStore::with_credentials(sample());
        assert_eq!(store.get().map(|c| c.user.username), Some("ada".to_string()));
    }
}
