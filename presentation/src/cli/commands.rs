//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for botchat
#[derive(Parser, Debug)]
#[command(name = "botchat")]
#[command(author, version, about = "Terminal client for a chatbot REST API")]
#[command(long_about = r#"
botchat talks to a chatbot server from the terminal.

Two modes are available:
  chat     Sign in, then chat in a session whose history the server keeps
  widget   Stateless one-message-at-a-time chat, no account needed

Configuration files are loaded from (in priority order):
1. BOTCHAT_* environment variables (e.g. BOTCHAT_SERVER__BASE_URL)
2. --config <path>     Explicit config file
3. ./botchat.toml      Project-level config
4. ~/.config/botchat/config.toml   Global config

Example:
  botchat
  botchat --server http://localhost:8000 chat
  botchat widget "What's the weather like?"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Chatbot server base URL (overrides server.base_url)
    #[arg(long, value_name = "URL", global = true)]
    pub server: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// The subcommand to run; plain `botchat` means `botchat chat`
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in (if needed) and start an interactive chat session
    Chat,
    /// Sign in and store the token
    Login,
    /// Create an account and sign in
    Signup,
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user, verified with the server
    Whoami,
    /// Chat through the stateless widget endpoint
    Widget {
        /// Send this one message and exit instead of starting a REPL
        message: Option<String>,

        /// CSRF token to send instead of the server cookie
        #[arg(long, value_name = "TOKEN")]
        csrf_token: Option<String>,
    },
}
