//! REPL for widget mode

use crate::chat::{TerminalChatView, line_editor};
use botchat_application::{WidgetBackend, WidgetChat};
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, Signal};
use std::io;
use std::path::Path;

/// Interactive loop over [`WidgetChat`]
///
/// No session and no sign-in: every line is one independent request.
pub struct WidgetRepl<W: WidgetBackend + 'static> {
    chat: WidgetChat<W>,
    view: TerminalChatView,
}

impl<W: WidgetBackend + 'static> WidgetRepl<W> {
    pub fn new(chat: WidgetChat<W>, view: TerminalChatView) -> Self {
        Self { chat, view }
    }

    /// Send a single message and print the reply
    pub async fn send_once(&mut self, message: &str) {
        self.chat.send(message, &self.view).await;
    }

    pub async fn run(&mut self, history_file: Option<&Path>) -> io::Result<()> {
        println!();
        println!("{}", "Chat Widget".cyan().bold());
        println!("{}", "Type a message, or /quit to exit.".dimmed());
        println!();

        let mut editor = line_editor(history_file);
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("widget".to_string()),
            DefaultPromptSegment::Empty,
        );

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(buffer) => {
                    let line = buffer.trim();
                    if matches!(line, "/quit" | "/exit" | "/q") {
                        println!("Bye!");
                        return Ok(());
                    }
                    self.chat.send(line, &self.view).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    return Ok(());
                }
            }
        }
    }
}
