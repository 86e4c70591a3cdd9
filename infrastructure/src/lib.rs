//! Infrastructure layer for botchat
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod credentials;
pub mod http;
pub mod pacing;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileChatConfig, FileConfig, FileCredentialsConfig,
    FileOutputConfig, FileReplConfig, FileServerConfig, FileWidgetConfig,
};
pub use credentials::FileCredentialStore;
pub use http::{DEFAULT_TIMEOUT, HttpChatClient, HttpWidgetClient};
pub use pacing::{DEFAULT_REVEAL_DELAY, TokioRevealPacer};
