//! Console output formatter for chat screens

use crate::chat::renderer::MarkdownRenderer;
use botchat_domain::{Identity, Message, SessionState};
use chrono::Local;
use colored::Colorize;

/// First lines shown in an empty chat
pub const GREETING: &str = "Hello! I'm your Gemini AI assistant.\nHow can I help you today?";

/// Formats chat state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Session status: `✓ Active`, `⚠️ Error` or `✗ Loading...`
    ///
    /// Any pending error wins, including one left by a failed send.
    pub fn status_label(state: &SessionState, last_error: Option<&str>) -> String {
        if last_error.is_some() {
            "⚠️ Error".yellow().to_string()
        } else if state.is_active() {
            "✓ Active".green().to_string()
        } else {
            "✗ Loading...".red().to_string()
        }
    }

    /// Status label followed by the shortened session id when there is one
    pub fn status_line(state: &SessionState, last_error: Option<&str>) -> String {
        let label = Self::status_label(state, last_error);
        match state.session_id() {
            Some(id) => format!("{}  {}", label, format!("ID: {}...", id.short()).dimmed()),
            None => label,
        }
    }

    /// Banner for an initialization or send failure
    pub fn error_banner(reason: &str) -> String {
        format!("{} {}", "Connection Error:".red().bold(), reason)
    }

    /// Chat screen header
    pub fn chat_header(identity: &Identity) -> String {
        let mut output = Self::header("AI Chat Assistant");
        output.push_str(&format!(
            "\n{}\n",
            format!("Welcome, {}!", identity.username).cyan().bold()
        ));
        output
    }

    pub fn identity(identity: &Identity) -> String {
        format!(
            "{} {} {}",
            "Signed in as".dimmed(),
            identity.username.bold(),
            format!("<{}>", identity.email).dimmed()
        )
    }

    /// One transcript entry: a sender label, then the text
    pub fn message(message: &Message, renderer: &MarkdownRenderer) -> String {
        let time = message
            .timestamp
            .map(|t| format!(" {}", t.with_timezone(&Local).format("%H:%M")).dimmed().to_string())
            .unwrap_or_default();

        if message.is_user() {
            format!("{}{}\n{}\n", Self::user_label(), time, message.text)
        } else {
            format!(
                "{}{}\n{}",
                Self::bot_label(),
                time,
                renderer.render(&message.text)
            )
        }
    }

    pub fn user_label() -> String {
        "You".green().bold().to_string()
    }

    pub fn bot_label() -> String {
        "Bot".cyan().bold().to_string()
    }

    /// Welcome shown when a chat starts with no history
    pub fn greeting() -> String {
        format!("{}\n{}\n", Self::bot_label(), GREETING)
    }

    /// Slash command reference
    pub fn help() -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", "Commands:".cyan().bold()));
        for (command, description) in [
            ("/new", "Clear the chat and start a new session"),
            ("/retry", "Retry connecting to the server"),
            ("/status", "Show the session status"),
            ("/whoami", "Show the signed-in user"),
            ("/logout", "Sign out"),
            ("/help", "Show this help"),
            ("/quit", "Exit chat"),
        ] {
            output.push_str(&format!("  {:<10} - {}\n", command, description));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botchat_domain::SessionId;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_status_labels() {
        plain();
        let active = SessionState::Active(SessionId::try_new("0123456789abcdef").unwrap());

        assert_eq!(ConsoleFormatter::status_label(&active, None), "✓ Active");
        assert_eq!(
            ConsoleFormatter::status_label(&active, Some("timeout")),
            "⚠️ Error"
        );
        assert_eq!(
            ConsoleFormatter::status_label(&SessionState::Initializing, None),
            "✗ Loading..."
        );
        assert_eq!(
            ConsoleFormatter::status_label(&SessionState::Error("x".into()), Some("x")),
            "⚠️ Error"
        );
    }

    #[test]
    fn test_status_line_shows_short_session_id() {
        plain();
        let active = SessionState::Active(SessionId::try_new("0123456789abcdef").unwrap());
        assert_eq!(
            ConsoleFormatter::status_line(&active, None),
            "✓ Active  ID: 01234567..."
        );
        assert_eq!(
            ConsoleFormatter::status_line(&SessionState::Uninitialized, None),
            "✗ Loading..."
        );
    }

    #[test]
    fn test_user_message_is_verbatim() {
        plain();
        let renderer = MarkdownRenderer::new(true);
        let output = ConsoleFormatter::message(&Message::user("**not bold**"), &renderer);
        assert_eq!(output, "You\n**not bold**\n");
    }

    #[test]
    fn test_help_lists_every_command() {
        plain();
        let help = ConsoleFormatter::help();
        for command in ["/new", "/retry", "/status", "/whoami", "/logout", "/help", "/quit"] {
            assert!(help.contains(command), "missing {}", command);
        }
    }
}
