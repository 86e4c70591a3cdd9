//! Presentation layer for botchat
//!
//! This crate contains the CLI definition, the auth form, the chat and
//! widget REPLs, and terminal rendering.

pub mod app;
pub mod auth;
pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod widget;

// Re-export commonly used types
pub use app::{AppError, ChatApp, print_identity};
pub use auth::{AuthForm, AuthSubmission};
pub use chat::{
    ChatRepl, InterruptRouter, MarkdownRenderer, ReplCommand, ReplExit, TerminalChatView,
};
pub use cli::commands::{Cli, Command};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use widget::WidgetRepl;
