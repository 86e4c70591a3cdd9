//! Widget Chat
//!
//! The lightweight embeddable chat: no session, no auth, no reveal. Each
//! message is one round trip to the widget endpoint, and every outcome
//! (including failures) becomes a bot message in the transcript.

use crate::ports::backend::WidgetBackend;
use crate::ports::chat_view::ChatView;
use botchat_domain::{Message, MessageText, WidgetReply};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct WidgetChat<W: WidgetBackend + 'static> {
    backend: Arc<W>,
    messages: Vec<Message>,
}

impl<W: WidgetBackend + 'static> WidgetChat<W> {
    pub fn new(backend: Arc<W>) -> Self {
        Self {
            backend,
            messages: Vec::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Send one message and append the reply
    ///
    /// Input is trimmed before sending. Returns `None` for blank input.
    pub async fn send(&mut self, text: &str, view: &dyn ChatView) -> Option<WidgetReply> {
        let text = MessageText::trimmed(text).ok()?;

        self.push_message(Message::user(text.as_str()), view);
        view.on_send_started();

        let reply = match self.backend.send(text.as_str()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Widget request failed: {}", e);
                WidgetReply::Failed(e.to_string())
            }
        };
        debug!(success = reply.is_success(), "Widget reply received");

        self.push_message(Message::bot(reply.display_text()), view);
        view.on_send_finished();
        Some(reply)
    }

    fn push_message(&mut self, message: Message, view: &dyn ChatView) {
        self.messages.push(message);
        if let Some(message) = self.messages.last() {
            view.on_message_appended(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::backend::BackendError;
    use crate::ports::chat_view::NoChatView;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockWidget {
        replies: Mutex<VecDeque<Result<WidgetReply, BackendError>>>,
        sent: Mutex<Vec<String>>,
    }

    impl MockWidget {
        fn with_reply(self, reply: Result<WidgetReply, BackendError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }
    }

    #[async_trait]
    impl WidgetBackend for MockWidget {
        async fn send(&self, message: &str) -> Result<WidgetReply, BackendError> {
            self.sent.lock().unwrap().push(message.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(WidgetReply::Empty))
        }
    }

    #[tokio::test]
    async fn test_send_trims_and_appends_reply() {
        let backend = Arc::new(
            MockWidget::default().with_reply(Ok(WidgetReply::BotResponse("hey".into()))),
        );
        let mut chat = WidgetChat::new(backend.clone());

        let reply = chat.send("  hello  ", &NoChatView).await;

        assert_eq!(reply, Some(WidgetReply::BotResponse("hey".into())));
        assert_eq!(backend.sent.lock().unwrap().as_slice(), &["hello"]);
        assert_eq!(chat.messages(), &[Message::user("hello"), Message::bot("hey")]);
    }

    #[tokio::test]
    async fn test_blank_input_sends_nothing() {
        let backend = Arc::new(MockWidget::default());
        let mut chat = WidgetChat::new(backend.clone());

        assert!(chat.send("   ", &NoChatView).await.is_none());
        assert!(backend.sent.lock().unwrap().is_empty());
        assert!(chat.messages().is_empty());
    }

    #[tokio::test]
    async fn test_error_payload_and_empty_body() {
        let backend = Arc::new(
            MockWidget::default()
                .with_reply(Ok(WidgetReply::Error("rate limited".into())))
                .with_reply(Ok(WidgetReply::Empty)),
        );
        let mut chat = WidgetChat::new(backend);

        chat.send("one", &NoChatView).await;
        chat.send("two", &NoChatView).await;

        let bot: Vec<_> = chat
            .messages()
            .iter()
            .filter(|m| m.is_bot())
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(bot, vec!["Error: rate limited", "No response from server"]);
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_bot_message() {
        let backend = Arc::new(MockWidget::default().with_reply(Err(BackendError::Status {
            status: 403,
            message: "HTTP error! status: 403, response: CSRF verification failed".into(),
        })));
        let mut chat = WidgetChat::new(backend);

        let reply = chat.send("hello", &NoChatView).await;

        assert!(matches!(reply, Some(WidgetReply::Failed(_))));
        assert_eq!(
            chat.messages()[1].text,
            "Sorry, there was an error sending your message: \
             HTTP error! status: 403, response: CSRF verification failed"
        );
    }
}
