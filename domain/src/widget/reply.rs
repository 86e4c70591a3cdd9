//! Widget reply value object

/// Outcome of one widget round trip, mapped to the text shown as the bot's
/// message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetReply {
    /// `{bot_response}` was present and non-empty
    BotResponse(String),
    /// `{error}` was present
    Error(String),
    /// Neither field was present
    Empty,
    /// The request failed before a usable body arrived
    Failed(String),
}

impl WidgetReply {
    pub fn display_text(&self) -> String {
        match self {
            WidgetReply::BotResponse(text) => text.clone(),
            WidgetReply::Error(error) => format!("Error: {}", error),
            WidgetReply::Empty => "No response from server".to_string(),
            WidgetReply::Failed(reason) => {
                format!("Sorry, there was an error sending your message: {}", reason)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WidgetReply::BotResponse(_))
    }
}
