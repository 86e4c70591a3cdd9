//! Identity Gate
//!
//! Decides whether the user is signed in before the chat is shown, and
//! handles sign-in, sign-up and sign-out against the auth endpoints.

use crate::ports::backend::{AuthBackend, BackendError};
use crate::ports::credential_store::{CredentialStore, CredentialStoreError};
use botchat_domain::{DomainError, Identity, LoginForm, SignupForm, StoredCredentials};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from sign-in and sign-up
#[derive(Error, Debug)]
pub enum AuthError {
    /// A required field was left blank; nothing was sent
    #[error(transparent)]
    InvalidForm(#[from] DomainError),

    /// The server rejected the request or could not be reached
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Failed to store credentials: {0}")]
    Storage(#[from] CredentialStoreError),
}

/// Gatekeeper between the user and the chat surface
pub struct IdentityGate<A: AuthBackend + 'static> {
    backend: Arc<A>,
    credentials: Arc<dyn CredentialStore>,
}

impl<A: AuthBackend + 'static> IdentityGate<A> {
    pub fn new(backend: Arc<A>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    /// Verify a stored token with the server
    ///
    /// Returns the confirmed identity, or `None` when there is no token or
    /// the server no longer accepts it. A rejected token is discarded.
    pub async fn restore(&self) -> Option<Identity> {
        let stored = self.credentials.get()?;

        match self.backend.check_auth(&stored.token).await {
            Ok(identity) => {
                info!(username = %identity.username, "Restored signed-in user");
                if identity != stored.user {
                    let refreshed = StoredCredentials::new(stored.token, identity.clone());
                    if let Err(e) = self.credentials.set(&refreshed) {
                        warn!("Failed to refresh stored identity: {}", e);
                    }
                }
                Some(identity)
            }
            Err(e) => {
                warn!("Stored token rejected, signing out: {}", e);
                if let Err(e) = self.credentials.clear() {
                    warn!("Failed to clear stored credentials: {}", e);
                }
                None
            }
        }
    }

    /// Sign in with a username and password
    pub async fn login(&self, form: &LoginForm) -> Result<Identity, AuthError> {
        form.validate()?;
        debug!(username = %form.username, "Signing in");
        let credentials = self.backend.login(form).await?;
        self.persist(credentials)
    }

    /// Create an account and sign in with it
    pub async fn signup(&self, form: &SignupForm) -> Result<Identity, AuthError> {
        form.validate()?;
        debug!(username = %form.username, "Creating account");
        let credentials = self.backend.signup(form).await?;
        self.persist(credentials)
    }

    /// Sign out
    ///
    /// The server is told when a token exists, but local credentials are
    /// cleared even if that call fails.
    pub async fn logout(&self) -> Result<(), AuthError> {
        if let Some(token) = self.credentials.token() {
            if let Err(e) = self.backend.logout(&token).await {
                warn!("Logout request failed: {}", e);
            }
        }
        self.credentials.clear()?;
        info!("Signed out");
        Ok(())
    }

    fn persist(&self, credentials: StoredCredentials) -> Result<Identity, AuthError> {
        self.credentials.set(&credentials)?;
        info!(username = %credentials.user.username, "Signed in");
        Ok(credentials.user)
    }
}
