//! Chatbot backend ports
//!
//! Defines the interfaces for the remote chatbot HTTP API. The session and
//! auth endpoints back the app surface; the widget endpoint is a separate,
//! stateless integration with its own response shape.

use async_trait::async_trait;
use botchat_domain::{
    AuthToken, Identity, LoginForm, Message, SessionId, SignupForm, StoredCredentials,
    WidgetReply,
};
use thiserror::Error;

/// Errors that can occur while talking to the backend
///
/// The `Display` output is the human-readable reason shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a response (DNS, connect, reset, ...)
    #[error("{0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP status; `message` is the server's reason if it gave one
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded or lacked a required field
    #[error("{0}")]
    Malformed(String),

    /// A success status carrying an application-level `{error}` payload
    #[error("{0}")]
    Application(String),
}

impl BackendError {
    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP
    pub fn is_transport(&self) -> bool {
        matches!(self, BackendError::Transport(_) | BackendError::Timeout)
    }
}

/// Session endpoints (`/api/sessions/...`)
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Create a new session, authenticated when a token is given
    async fn create_session(&self, token: Option<&AuthToken>) -> Result<SessionId, BackendError>;

    /// Fetch the stored messages of a session, oldest first
    async fn get_messages(&self, session_id: &SessionId) -> Result<Vec<Message>, BackendError>;

    /// Post a user message and return the bot's full reply text
    async fn post_message(
        &self,
        token: Option<&AuthToken>,
        session_id: &SessionId,
        message: &str,
    ) -> Result<String, BackendError>;
}

/// Authentication endpoints (`/api/login/`, `/api/signup/`, ...)
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, form: &LoginForm) -> Result<StoredCredentials, BackendError>;

    async fn signup(&self, form: &SignupForm) -> Result<StoredCredentials, BackendError>;

    async fn logout(&self, token: &AuthToken) -> Result<(), BackendError>;

    /// Verify a token and return the user it belongs to
    async fn check_auth(&self, token: &AuthToken) -> Result<Identity, BackendError>;
}

/// The stateless widget endpoint (`/send_message/`)
#[async_trait]
pub trait WidgetBackend: Send + Sync {
    /// Send one message. A non-success status is an `Err`; a success body is
    /// classified into a [`WidgetReply`].
    async fn send(&self, message: &str) -> Result<WidgetReply, BackendError>;
}
