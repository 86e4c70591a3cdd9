//! REPL (Read-Eval-Print Loop) for interactive chat

use super::command::ReplCommand;
use super::interrupt::InterruptRouter;
use super::renderer::TerminalChatView;
use crate::ConsoleFormatter;
use botchat_application::{ChatBackend, ChatController, SendOutcome};
use botchat_domain::Identity;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::io;
use std::path::Path;
use tracing::{debug, warn};

const HISTORY_CAPACITY: usize = 1000;

/// Why the chat REPL ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplExit {
    Quit,
    Logout,
}

/// Line editor with history persisted to `history_file` when possible
pub fn line_editor(history_file: Option<&Path>) -> Reedline {
    let editor = Reedline::create();
    let Some(path) = history_file else {
        return editor;
    };

    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!("Could not create history directory {}: {}", parent.display(), e);
        return editor;
    }

    match FileBackedHistory::with_file(HISTORY_CAPACITY, path.to_path_buf()) {
        Ok(history) => editor.with_history(Box::new(history)),
        Err(e) => {
            warn!("Could not open history file {}: {}", path.display(), e);
            editor
        }
    }
}

/// Interactive chat REPL for one signed-in user
pub struct ChatRepl<B: ChatBackend + 'static> {
    controller: ChatController<B>,
    view: TerminalChatView,
    identity: Identity,
    interrupts: InterruptRouter,
}

impl<B: ChatBackend + 'static> ChatRepl<B> {
    pub fn new(
        controller: ChatController<B>,
        view: TerminalChatView,
        identity: Identity,
        interrupts: InterruptRouter,
    ) -> Self {
        Self {
            controller,
            view,
            identity,
            interrupts,
        }
    }

    /// Run the interactive REPL until the user quits or signs out
    pub async fn run(&mut self, history_file: Option<&Path>) -> io::Result<ReplExit> {
        println!();
        println!("{}", ConsoleFormatter::chat_header(&self.identity));
        println!("{}", "Type /help for commands.".dimmed());

        self.controller.initialize(&self.view).await;

        let mut editor = line_editor(history_file);

        let exit = loop {
            let prompt = self.prompt();
            match editor.read_line(&prompt) {
                Ok(Signal::Success(buffer)) => {
                    if buffer.trim().is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(&buffer) {
                        if let Some(exit) = self.handle_command(command).await {
                            break exit;
                        }
                        continue;
                    }

                    self.send(&buffer).await;
                    if self.controller.is_torn_down() {
                        println!("{}", "Chat closed.".dimmed());
                        break ReplExit::Quit;
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break ReplExit::Quit;
                }
                Err(e) => {
                    self.controller.shutdown();
                    return Err(e);
                }
            }
        };

        self.controller.shutdown();
        Ok(exit)
    }

    fn prompt(&self) -> DefaultPrompt {
        let label = if self.controller.state().is_active() {
            self.identity.username.clone()
        } else {
            "Initializing...".to_string()
        };
        DefaultPrompt::new(
            DefaultPromptSegment::Basic(label),
            DefaultPromptSegment::Empty,
        )
    }

    /// Send a message; Ctrl+C while the reply is shown closes the chat
    async fn send(&mut self, text: &str) {
        if !self.controller.can_send() {
            if self.controller.state().is_error() {
                println!("{}", "Not connected. Type /retry to reconnect.".yellow());
            } else {
                println!("{}", "Still connecting, please wait...".yellow());
            }
            return;
        }

        let outcome = {
            let _armed = self.interrupts.arm(self.controller.cancellation_token());
            self.controller.send_message(text, &self.view).await
        };

        match outcome {
            SendOutcome::Failed(e) => {
                println!("{}", ConsoleFormatter::error_banner(&e.to_string()));
            }
            SendOutcome::Abandoned => println!(),
            SendOutcome::Replied | SendOutcome::Ignored => {}
        }
    }

    /// Handle slash commands. Returns the exit reason if the REPL should end.
    async fn handle_command(&mut self, command: ReplCommand) -> Option<ReplExit> {
        debug!(?command, "REPL command");
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                Some(ReplExit::Quit)
            }
            ReplCommand::Logout => Some(ReplExit::Logout),
            ReplCommand::New => {
                self.controller.clear(&self.view).await;
                None
            }
            ReplCommand::Retry => {
                self.controller.retry(&self.view).await;
                None
            }
            ReplCommand::Status => {
                println!(
                    "{}",
                    ConsoleFormatter::status_line(
                        self.controller.state(),
                        self.controller.last_error()
                    )
                );
                if let Some(reason) = self.controller.last_error() {
                    println!("{}", ConsoleFormatter::error_banner(reason));
                }
                println!(
                    "{}",
                    format!("{} messages", self.controller.messages().len()).dimmed()
                );
                None
            }
            ReplCommand::Whoami => {
                println!("{}", ConsoleFormatter::identity(&self.identity));
                None
            }
            ReplCommand::Help => {
                println!();
                print!("{}", ConsoleFormatter::help());
                println!();
                None
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
                None
            }
        }
    }
}
