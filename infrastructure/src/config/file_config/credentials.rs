//! Credential storage configuration from TOML (`[credentials]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCredentialsConfig {
    /// Credentials file; `~/` is expanded. Defaults to the data directory.
    pub path: Option<String>,
}

impl FileCredentialsConfig {
    /// Configured path with `~/` expanded, if one is set
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(super::expand_home)
    }
}
