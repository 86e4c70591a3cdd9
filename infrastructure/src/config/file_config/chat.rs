//! Chat configuration from TOML (`[chat]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Delay before each revealed character; 0 prints replies at once
    pub reveal_delay_ms: u64,
    /// Render bot messages as terminal markdown
    pub render_markdown: bool,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 15,
            render_markdown: true,
        }
    }
}
