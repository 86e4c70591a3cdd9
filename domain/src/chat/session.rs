//! Session identity and lifecycle state

use crate::core::error::DomainError;
use crate::util::char_prefix;
use serde::{Deserialize, Serialize};

/// Number of characters shown when a session id is abbreviated
const SHORT_ID_LEN: usize = 8;

/// Opaque, server-issued session identifier (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn try_new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptySessionId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters of the id, for status displays
    pub fn short(&self) -> &str {
        char_prefix(&self.0, SHORT_ID_LEN)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of the client's chat session
///
/// ```text
/// Uninitialized ──▶ Initializing ──▶ Active(id)
///                        ▲  │             │
///                        │  ▼             │ clear
///                        └─ Error(reason) ◀┘ (via Initializing)
/// ```
///
/// `Active` and `Error` both re-enter `Initializing` on clear or retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Active(SessionId),
    Error(String),
}

impl SessionState {
    pub fn session_id(&self) -> Option<&SessionId> {
        match self {
            SessionState::Active(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SessionState::Error(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Error(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Initializing => "initializing",
            SessionState::Active(_) => "active",
            SessionState::Error(_) => "error",
        }
    }
}
