use tracing::{debug, warn};

use crate::models::responder::{ChatReply, Responder, ResponderError};
use crate::session::message::Message;

/// Builds the assistant text shown when the responder cannot be reached.
pub fn fallback_text(base_url: &str) -> String {
    format!(
        "Lo siento, ocurrió un error al procesar tu mensaje. \
         Por favor, verifica que el backend esté ejecutándose en {base_url}"
    )
}

/// A user message that has been recorded and is waiting for its reply.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending send must be settled"]
pub struct PendingSend {
    text: String,
}

impl PendingSend {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// In-memory conversation: append-only messages plus the in-flight flag.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
    awaiting_response: bool,
    fallback_text: String,
}

impl ConversationStore {
    pub fn new(base_url: &str) -> Self {
        ConversationStore {
            messages: Vec::new(),
            awaiting_response: false,
            fallback_text: fallback_text(base_url),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn awaiting_response(&self) -> bool {
        self.awaiting_response
    }

    pub fn fallback_text(&self) -> &str {
        &self.fallback_text
    }

    /// Records the user's message and marks a reply as pending.
    ///
    /// Returns `None` without touching the store when the trimmed input is
    /// empty or another exchange is still in flight.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        if self.awaiting_response {
            warn!("ignoring send while a response is pending");
            return None;
        }

        self.messages.push(Message::user(text));
        self.awaiting_response = true;
        debug!(messages = self.messages.len(), "user message recorded");

        Some(PendingSend {
            text: text.to_string(),
        })
    }

    /// Appends the reply, or the fallback text on failure, and clears the flag.
    pub fn settle(
        &mut self,
        pending: PendingSend,
        result: Result<ChatReply, ResponderError>,
    ) -> &Message {
        let message = match result {
            Ok(reply) => Message::assistant(reply.response),
            Err(err) => {
                warn!(error = %err, chars = pending.text.chars().count(), "chat request failed");
                Message::assistant(self.fallback_text.clone())
            }
        };

        self.messages.push(message);
        self.awaiting_response = false;
        &self.messages[self.messages.len() - 1]
    }

    /// Full exchange: record, ask the responder once, record the outcome.
    pub async fn send<R>(&mut self, responder: &R, input: &str) -> Option<&Message>
    where
        R: Responder + ?Sized,
    {
        let pending = self.begin_send(input)?;
        let result = responder.reply(pending.text()).await;
        Some(self.settle(pending, result))
    }
}
