//! Interactive chat module
//!
//! Provides the line-editor chat REPL and the terminal renderer it reports to.

mod command;
mod interrupt;
mod repl;
pub mod renderer;

pub use command::ReplCommand;
pub use interrupt::{ArmedInterrupt, InterruptRouter};
pub use renderer::{MarkdownRenderer, TerminalChatView};
pub use repl::{ChatRepl, ReplExit, line_editor};
