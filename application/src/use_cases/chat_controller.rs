//! Chat Controller
//!
//! Owns the chat session lifecycle and the message history for one chat
//! surface. Reports every change to a [`ChatView`] supplied per call.
//!
//! Only one send can be in flight: [`ChatController::send_message`] takes
//! `&mut self`, and the streaming buffer exists only while a reply is being
//! revealed.

use crate::ports::backend::{BackendError, ChatBackend};
use crate::ports::chat_view::ChatView;
use crate::ports::credential_store::CredentialStore;
use crate::ports::reveal_pacer::{ImmediatePacer, RevealPacer};
use botchat_domain::util::truncate_str;
use botchat_domain::{Message, MessageText, Reveal, SessionId, SessionState};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of a [`ChatController::send_message`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input, no active session, or the controller was torn down
    Ignored,
    /// The reply was revealed and appended
    Replied,
    /// The request failed; a synthetic bot message describes why
    Failed(BackendError),
    /// The controller was torn down while the reply was being revealed
    Abandoned,
}

/// Session lifecycle and transcript for one chat surface
pub struct ChatController<B: ChatBackend + 'static> {
    backend: Arc<B>,
    credentials: Arc<dyn CredentialStore>,
    pacer: Arc<dyn RevealPacer>,
    state: SessionState,
    messages: Vec<Message>,
    /// Partially revealed bot reply
    streaming: Option<String>,
    sending: bool,
    /// Reason the last send failed, shown until the next send/clear/retry
    send_error: Option<String>,
    /// Cancelled on teardown
    cancellation: CancellationToken,
}

impl<B: ChatBackend + 'static> ChatController<B> {
    /// Create a controller in the `Uninitialized` state
    pub fn new(backend: Arc<B>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            backend,
            credentials,
            pacer: Arc::new(ImmediatePacer),
            state: SessionState::Uninitialized,
            messages: Vec::new(),
            streaming: None,
            sending: false,
            send_error: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Set the pacer that spaces out reveal frames
    pub fn with_pacer(mut self, pacer: Arc<dyn RevealPacer>) -> Self {
        self.pacer = pacer;
        self
    }

    // ==================== Accessors ====================

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.state.session_id()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The partially revealed reply, while a reveal is running
    pub fn streaming_text(&self) -> Option<&str> {
        self.streaming.as_deref()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Whether a new message would be dispatched right now
    pub fn can_send(&self) -> bool {
        self.state.is_active() && !self.is_sending() && !self.is_torn_down()
    }

    /// Error to show in the banner: an init failure, else the last send failure
    pub fn last_error(&self) -> Option<&str> {
        self.state.error().or(self.send_error.as_deref())
    }

    /// Token that tears the controller down when cancelled
    ///
    /// Hand a clone to whatever may end the chat while a reply is being
    /// revealed (e.g. a Ctrl+C handler).
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    // ==================== Lifecycle ====================

    /// Request a new session and load its history
    ///
    /// History failures are not surfaced: the chat simply starts empty.
    pub async fn initialize(&mut self, view: &dyn ChatView) {
        if self.is_torn_down() {
            return;
        }

        self.set_state(SessionState::Initializing, view);
        info!("Initializing session");

        let token = self.credentials.token();
        let result = self.backend.create_session(token.as_ref()).await;

        if self.is_torn_down() {
            debug!("Controller torn down during session initialization");
            return;
        }

        match result {
            Ok(session_id) => {
                info!(session_id = %session_id, "Session created");
                self.set_state(SessionState::Active(session_id.clone()), view);
                self.load_history(&session_id, view).await;
            }
            Err(e) => {
                warn!("Error initializing session: {}", e);
                self.set_state(SessionState::Error(e.to_string()), view);
            }
        }
    }

    /// Retry after a failed initialization (or a failed send)
    pub async fn retry(&mut self, view: &dyn ChatView) {
        if self.is_torn_down() {
            return;
        }
        self.send_error = None;
        self.initialize(view).await;
    }

    /// Discard the transcript and start a new session
    pub async fn clear(&mut self, view: &dyn ChatView) {
        if self.is_torn_down() {
            return;
        }
        self.messages.clear();
        self.send_error = None;
        self.streaming = None;
        view.on_cleared();
        self.initialize(view).await;
    }

    /// Tear the controller down
    ///
    /// A reveal in progress is abandoned and every later call is a no-op.
    pub fn shutdown(&self) {
        self.cancellation.cancel();
    }

    // ==================== Messaging ====================

    /// Send a user message and reveal the bot's reply
    pub async fn send_message(&mut self, text: &str, view: &dyn ChatView) -> SendOutcome {
        if self.is_torn_down() || self.sending {
            return SendOutcome::Ignored;
        }
        let Ok(text) = MessageText::try_new(text) else {
            debug!("Cannot send message - empty input");
            return SendOutcome::Ignored;
        };
        let Some(session_id) = self.state.session_id().cloned() else {
            debug!("Cannot send message - no active session");
            return SendOutcome::Ignored;
        };

        self.push_message(Message::user(text.as_str()), view);
        self.sending = true;
        self.send_error = None;
        view.on_send_started();

        debug!(
            session_id = %session_id,
            preview = truncate_str(text.as_str(), 80),
            "Sending message"
        );

        let token = self.credentials.token();
        let result = self
            .backend
            .post_message(token.as_ref(), &session_id, text.as_str())
            .await;

        let outcome = match result {
            Ok(reply) => self.reveal(reply, view).await,
            Err(_) if self.is_torn_down() => SendOutcome::Abandoned,
            Err(e) => {
                warn!("Error sending message: {}", e);
                let reason = e.to_string();
                self.push_message(
                    Message::bot(format!("Sorry, I encountered an error: {}", reason)),
                    view,
                );
                self.send_error = Some(reason);
                SendOutcome::Failed(e)
            }
        };

        self.streaming = None;
        self.sending = false;
        if outcome != SendOutcome::Abandoned {
            view.on_send_finished();
        }
        outcome
    }

    /// Reveal `reply` frame by frame, then append it as a finalized message
    async fn reveal(&mut self, reply: String, view: &dyn ChatView) -> SendOutcome {
        let cancellation = self.cancellation.clone();
        let pacer = Arc::clone(&self.pacer);

        self.streaming = Some(String::with_capacity(reply.len()));
        view.on_reveal_started();

        for frame in Reveal::new(&reply) {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    debug!("Reveal abandoned after teardown");
                    self.streaming = None;
                    return SendOutcome::Abandoned;
                }
                _ = pacer.pause() => {}
            }

            self.show_frame(frame, view);
        }

        self.streaming = None;
        view.on_reveal_finished();
        self.push_message(Message::bot(reply), view);
        SendOutcome::Replied
    }

    /// Replace the streaming buffer with `frame` and show it
    fn show_frame(&mut self, frame: &str, view: &dyn ChatView) {
        let buffer = self.streaming.get_or_insert_with(String::new);
        buffer.clear();
        buffer.push_str(frame);
        view.on_reveal_frame(buffer);
    }

    // ==================== Internals ====================

    async fn load_history(&mut self, session_id: &SessionId, view: &dyn ChatView) {
        debug!(session_id = %session_id, "Loading messages");
        let messages = match self.backend.get_messages(session_id).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!("Failed to load messages, continuing with empty chat: {}", e);
                Vec::new()
            }
        };

        if self.is_torn_down() {
            return;
        }

        debug!(count = messages.len(), "Messages loaded");
        self.messages = messages;
        view.on_history_loaded(&self.messages);
    }

    fn set_state(&mut self, state: SessionState, view: &dyn ChatView) {
        debug!(from = self.state.as_str(), to = state.as_str(), "Session state change");
        self.state = state;
        view.on_state_changed(&self.state);
    }

    fn push_message(&mut self, message: Message, view: &dyn ChatView) {
        self.messages.push(message);
        if let Some(message) = self.messages.last() {
            view.on_message_appended(message);
        }
    }
}
