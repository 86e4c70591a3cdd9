//! Configuration file loading for botchat
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `BOTCHAT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./botchat.toml` or `./.botchat.toml`
//! 4. Global: `~/.config/botchat/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileChatConfig, FileConfig, FileCredentialsConfig, FileOutputConfig,
    FileReplConfig, FileServerConfig, FileWidgetConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
