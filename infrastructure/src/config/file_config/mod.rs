//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section has defaults, so a partial file (or none) is valid.

mod chat;
mod credentials;
mod output;
mod repl;
mod server;
mod widget;

pub use chat::FileChatConfig;
pub use credentials::FileCredentialsConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use server::FileServerConfig;
pub use widget::FileWidgetConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("server.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("server.base_url must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chatbot API location
    pub server: FileServerConfig,
    /// Chat surface behaviour
    pub chat: FileChatConfig,
    /// Widget mode settings
    pub widget: FileWidgetConfig,
    /// Where the signed-in user's token is kept
    pub credentials: FileCredentialsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate values that would otherwise fail at the first request
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.server.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        let url = self.server.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigValidationError::InvalidBaseUrl(
                self.server.base_url.clone(),
            ));
        }
        Ok(())
    }
}

/// Expand a leading `~/` to the home directory
pub(crate) fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[server]
base_url = "https://chat.example.com"
timeout_seconds = 10

[chat]
reveal_delay_ms = 0
render_markdown = false

[widget]
page_path = "/widget/"
csrf_token = "from-form"

[credentials]
path = "/tmp/botchat/credentials.json"

[output]
color = false

[repl]
history_file = "/tmp/botchat/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "https://chat.example.com");
        assert_eq!(config.server.timeout_seconds, 10);
        assert_eq!(config.chat.reveal_delay_ms, 0);
        assert!(!config.chat.render_markdown);
        assert_eq!(config.widget.page_path, "/widget/");
        assert_eq!(config.widget.csrf_token.as_deref(), Some("from-form"));
        assert_eq!(
            config.credentials.resolved_path(),
            Some(PathBuf::from("/tmp/botchat/credentials.json"))
        );
        assert!(!config.output.color);
        assert_eq!(
            config.repl.history_path(),
            Some(PathBuf::from("/tmp/botchat/history.txt"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[server]
base_url = "http://10.0.0.5:8000"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.base_url, "http://10.0.0.5:8000");
        // Defaults should apply
        assert_eq!(config.server.timeout_seconds, 30);
        assert_eq!(config.chat.reveal_delay_ms, 15);
        assert!(config.chat.render_markdown);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.widget.page_path, "/");
        assert!(config.widget.csrf_token.is_none());
        assert!(config.credentials.resolved_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FileConfig::default();
        config.server.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));

        let mut config = FileConfig::default();
        config.server.base_url = "localhost:8000".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_blank_paths_fall_back_to_defaults() {
        let toml_str = r#"
[credentials]
path = ""

[repl]
history_file = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.credentials.resolved_path().is_none());
        assert_eq!(
            config.repl.history_path(),
            dirs::data_dir().map(|d| d.join("botchat").join("history.txt"))
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.json"), home.join("x.json"));
        }
    }
}
