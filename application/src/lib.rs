//! Application layer for botchat
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    backend::{AuthBackend, BackendError, ChatBackend, WidgetBackend},
    chat_view::{ChatView, NoChatView},
    credential_store::{CredentialStore, CredentialStoreError, InMemoryCredentialStore},
    reveal_pacer::{ImmediatePacer, RevealPacer},
};
pub use use_cases::chat_controller::{ChatController, SendOutcome};
pub use use_cases::identity_gate::{AuthError, IdentityGate};
pub use use_cases::widget_chat::WidgetChat;
