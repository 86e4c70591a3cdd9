//! REPL configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file
    pub history_file: Option<String>,
}

impl FileReplConfig {
    /// History file: the configured path, else `<data_dir>/botchat/history.txt`
    pub fn history_path(&self) -> Option<PathBuf> {
        match self.history_file.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(path) => Some(super::expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("botchat").join("history.txt")),
        }
    }
}
