//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior, filled in by the
//! binary from the loaded config file.

use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Enable colored terminal output
    pub color: bool,
    /// Render bot messages as terminal markdown
    pub render_markdown: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            render_markdown: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplConfig {
    /// Path to history file; `None` keeps history in memory only
    pub history_file: Option<PathBuf>,
}
