//! Widget configuration from TOML (`[widget]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWidgetConfig {
    /// Page fetched to obtain the `csrftoken` cookie
    pub page_path: String,
    /// Explicit CSRF token; takes precedence over the cookie
    pub csrf_token: Option<String>,
}

impl Default for FileWidgetConfig {
    fn default() -> Self {
        Self {
            page_path: "/".to_string(),
            csrf_token: None,
        }
    }
}
