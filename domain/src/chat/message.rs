//! Chat message entities

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Map the backend's `is_user` flag to a sender
    pub fn from_is_user(is_user: bool) -> Self {
        if is_user { Sender::User } else { Sender::Bot }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the chat transcript (Entity)
///
/// Insertion order is display order. `timestamp` is only known for
/// messages loaded back from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            timestamp: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }
}

/// Text the user asked to send (Value Object)
///
/// Guaranteed not to be empty or whitespace-only. The original text is
/// kept as typed; only the blank check looks at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText {
    content: String,
}

impl MessageText {
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            Err(DomainError::EmptyMessage)
        } else {
            Ok(Self { content })
        }
    }

    /// Same as [`try_new`](Self::try_new) but stores the trimmed text
    pub fn trimmed(content: &str) -> Result<Self, DomainError> {
        Self::try_new(content.trim())
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for MessageText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let user = Message::user("hello");
        assert!(user.is_user());
        assert_eq!(user.text, "hello");
        assert!(user.timestamp.is_none());

        let bot = Message::bot("hi there");
        assert!(bot.is_bot());
        assert_eq!(bot.sender, Sender::Bot);
    }

    #[test]
    fn test_sender_from_is_user() {
        assert_eq!(Sender::from_is_user(true), Sender::User);
        assert_eq!(Sender::from_is_user(false), Sender::Bot);
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
        assert_eq!(Sender::User.to_string(), "user");
    }

    #[test]
    fn test_message_text_rejects_blank() {
        assert_eq!(MessageText::try_new(""), Err(DomainError::EmptyMessage));
        assert_eq!(MessageText::try_new("  \t\n"), Err(DomainError::EmptyMessage));
    }

    #[test]
    fn test_message_text_keeps_original_spacing() {
        let text = MessageText::try_new("  hello ").unwrap();
        assert_eq!(text.as_str(), "  hello ");

        let trimmed = MessageText::trimmed("  hello ").unwrap();
        assert_eq!(trimmed.as_str(), "hello");
    }
}
