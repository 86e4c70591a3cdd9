//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Session id cannot be empty")]
    EmptySessionId,

    #[error("{field} is required")]
    MissingField { field: &'static str },
}
