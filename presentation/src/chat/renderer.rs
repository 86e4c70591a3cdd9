//! Terminal rendering of chat events
//!
//! Replies are revealed as raw text. Once a reveal finishes, the raw text is
//! replaced in place by its markdown rendering when it fits on screen.

use crate::output::console::ConsoleFormatter;
use botchat_application::ChatView;
use botchat_domain::{Message, SessionState};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use termimad::MadSkin;

/// Markdown to terminal text via `termimad`
pub struct MarkdownRenderer {
    skin: MadSkin,
    enabled: bool,
}

impl MarkdownRenderer {
    pub fn new(enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.inline_code
            .set_fg(termimad::crossterm::style::Color::Yellow);
        skin.bold.set_fg(termimad::crossterm::style::Color::Cyan);
        Self { skin, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Render `text`, always ending with a newline
    pub fn render(&self, text: &str) -> String {
        let mut output = if self.enabled {
            self.skin.term_text(text).to_string()
        } else {
            text.to_string()
        };
        if !output.ends_with('\n') {
            output.push('\n');
        }
        output
    }
}

/// Terminal rows `text` occupies when printed at `width` columns
pub fn rows_used(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum()
}

#[derive(Default)]
struct RevealProgress {
    /// Streaming text printed so far
    printed: String,
    /// Raw text of the reveal that just finished, awaiting its final message
    finished: Option<String>,
}

/// [`ChatView`] that prints to the terminal
pub struct TerminalChatView {
    renderer: MarkdownRenderer,
    spinner: Mutex<Option<ProgressBar>>,
    reveal: Mutex<RevealProgress>,
}

impl TerminalChatView {
    pub fn new(renderer: MarkdownRenderer) -> Self {
        Self {
            renderer,
            spinner: Mutex::new(None),
            reveal: Mutex::new(RevealProgress::default()),
        }
    }

    fn start_spinner(&self, message: &'static str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(100));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(spinner);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        let spinner = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
    }

    /// Replace the raw revealed text with its rendered form
    fn finalize_reveal(&self, raw: &str, message: &Message) {
        if !self.renderer.is_enabled() {
            return;
        }
        let (width, height) = termimad::terminal_size();
        let rows = rows_used(raw, width as usize);
        if rows == 0 || rows >= height as usize {
            return;
        }
        print!("\x1b[{}A\x1b[J{}", rows, self.renderer.render(&message.text));
        flush();
    }
}

impl ChatView for TerminalChatView {
    fn on_state_changed(&self, state: &SessionState) {
        match state {
            SessionState::Initializing => self.start_spinner("Initializing..."),
            SessionState::Active(_) => {
                self.stop_spinner();
                println!("{}", ConsoleFormatter::status_line(state, None));
            }
            SessionState::Error(reason) => {
                self.stop_spinner();
                println!("{}", ConsoleFormatter::error_banner(reason));
                println!("{}", "Type /retry to reconnect.".dimmed());
            }
            SessionState::Uninitialized => self.stop_spinner(),
        }
    }

    fn on_history_loaded(&self, messages: &[Message]) {
        println!();
        if messages.is_empty() {
            println!("{}", ConsoleFormatter::greeting());
            return;
        }
        for message in messages {
            println!("{}", ConsoleFormatter::message(message, &self.renderer));
        }
    }

    fn on_cleared(&self) {
        println!("{}", "Chat cleared.".dimmed());
    }

    fn on_message_appended(&self, message: &Message) {
        // User messages are already on screen as typed
        if message.is_user() {
            return;
        }
        self.stop_spinner();

        let finished = self
            .reveal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .finished
            .take();
        match finished {
            Some(raw) => self.finalize_reveal(&raw, message),
            None => println!("{}", ConsoleFormatter::message(message, &self.renderer)),
        }
    }

    fn on_send_started(&self) {
        self.start_spinner("Bot is typing...");
    }

    fn on_reveal_started(&self) {
        self.stop_spinner();
        *self.reveal.lock().unwrap_or_else(PoisonError::into_inner) = RevealProgress::default();
        println!("{}", ConsoleFormatter::bot_label());
    }

    fn on_reveal_frame(&self, buffer: &str) {
        let mut reveal = self.reveal.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(delta) = buffer.get(reveal.printed.len()..) {
            print!("{}", delta);
            flush();
            reveal.printed.push_str(delta);
        }
    }

    fn on_reveal_finished(&self) {
        println!();
        let mut reveal = self.reveal.lock().unwrap_or_else(PoisonError::into_inner);
        let printed = std::mem::take(&mut reveal.printed);
        reveal.finished = Some(printed);
    }

    fn on_send_finished(&self) {
        self.stop_spinner();
        println!();
    }
}

fn flush() {
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_used() {
        assert_eq!(rows_used("", 80), 1);
        assert_eq!(rows_used("hello", 80), 1);
        assert_eq!(rows_used(&"x".repeat(80), 80), 1);
        assert_eq!(rows_used(&"x".repeat(81), 80), 2);
        assert_eq!(rows_used("a\nb\n\nc", 80), 4);
        assert_eq!(rows_used("héllo", 2), 3);
    }

    #[test]
    fn test_plain_renderer_keeps_text() {
        let renderer = MarkdownRenderer::new(false);
        assert_eq!(renderer.render("**hi**"), "**hi**\n");
        assert_eq!(renderer.render("line\n"), "line\n");
    }

    #[test]
    fn test_markdown_renderer_strips_markup() {
        let renderer = MarkdownRenderer::new(true);
        let rendered = renderer.render("**hi**");
        assert!(rendered.contains("hi"));
        assert!(rendered.ends_with('\n'));
    }
}
