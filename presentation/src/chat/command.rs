//! Slash commands understood by the chat REPL

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Clear the transcript and start a new session
    New,
    Retry,
    Status,
    Whoami,
    Logout,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`; other lines are chat messages
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let command = line.split_whitespace().next().unwrap_or(line);
        Some(match command {
            "/new" | "/clear" => ReplCommand::New,
            "/retry" => ReplCommand::Retry,
            "/status" => ReplCommand::Status,
            "/whoami" => ReplCommand::Whoami,
            "/logout" => ReplCommand::Logout,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands_and_aliases() {
        assert_eq!(ReplCommand::parse("/new"), Some(ReplCommand::New));
        assert_eq!(ReplCommand::parse("/clear"), Some(ReplCommand::New));
        assert_eq!(ReplCommand::parse("  /retry  "), Some(ReplCommand::Retry));
        assert_eq!(ReplCommand::parse("/q"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/?"), Some(ReplCommand::Help));
        assert_eq!(
            ReplCommand::parse("/dance now"),
            Some(ReplCommand::Unknown("/dance".to_string()))
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(ReplCommand::parse("hello /new"), None);
        assert_eq!(ReplCommand::parse(""), None);
    }
}
