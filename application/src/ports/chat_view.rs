//! Chat view port
//!
//! Callbacks through which use cases report state changes to whatever is
//! rendering the chat. Implementations live in the presentation layer.

use botchat_domain::{Message, SessionState};

/// Receives chat state changes as they happen
///
/// Every method has a no-op default so renderers only implement what they
/// display.
pub trait ChatView: Send + Sync {
    /// The session lifecycle moved to a new state
    fn on_state_changed(&self, _state: &SessionState) {}

    /// The transcript was replaced wholesale (history load)
    fn on_history_loaded(&self, _messages: &[Message]) {}

    /// The transcript was emptied
    fn on_cleared(&self) {}

    /// A message was appended to the transcript
    fn on_message_appended(&self, _message: &Message) {}

    /// A send started; input should be disabled
    fn on_send_started(&self) {}

    /// The full reply arrived and is about to be revealed
    fn on_reveal_started(&self) {}

    /// The streaming buffer now holds `buffer`
    fn on_reveal_frame(&self, _buffer: &str) {}

    /// The reveal finished; the finalized message follows
    fn on_reveal_finished(&self) {}

    /// The send round trip is over; input may be re-enabled
    fn on_send_finished(&self) {}
}

/// No-op view for when nothing is rendering
pub struct NoChatView;

impl ChatView for NoChatView {}
