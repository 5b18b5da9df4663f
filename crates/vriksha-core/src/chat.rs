//! Append-only conversation log for the chat widget.
//!
//! A [`Conversation`] records messages in send order and allows at most
//! one unresolved user message at a time: a second [`Conversation::submit`]
//! while a reply is pending is rejected, so replies can never be appended
//! out of order relative to the request that triggered them.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AssistantReply, ChatMessage};
use crate::responder::WELCOME_MESSAGE;

/// Text stored for a user message that only carries an image.
pub const IMAGE_ONLY_PROMPT: &str = "Please analyze this plant image";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("message must have text or an attached image")]
    EmptyMessage,
    #[error("a reply is still pending for this conversation")]
    ReplyPending,
}

/// Ordered chat history for one storefront session.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    awaiting_reply: bool,
}

impl Conversation {
    /// Start a conversation seeded with the assistant's welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![assistant_message(WELCOME_MESSAGE.to_string())],
            awaiting_reply: false,
        }
    }

    /// Record an outbound user message and mark the conversation as
    /// awaiting a reply.
    pub fn submit(
        &mut self,
        text: &str,
        image: Option<String>,
    ) -> Result<ChatMessage, ConversationError> {
        if self.awaiting_reply {
            return Err(ConversationError::ReplyPending);
        }

        let image = image.filter(|i| !i.trim().is_empty());
        let text = text.trim();
        let text = match (text.is_empty(), &image) {
            (true, None) => return Err(ConversationError::EmptyMessage),
            (true, Some(_)) => IMAGE_ONLY_PROMPT.to_string(),
            (false, _) => text.to_string(),
        };

        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            text,
            is_from_assistant: false,
            timestamp: Utc::now(),
            attached_image: image,
        };
        self.messages.push(message.clone());
        self.awaiting_reply = true;
        Ok(message)
    }

    /// Append the assistant's reply to the pending request.
    pub fn complete(&mut self, reply: &AssistantReply) -> ChatMessage {
        let message = assistant_message(reply.message.clone());
        self.messages.push(message.clone());
        self.awaiting_reply = false;
        message
    }

    /// Drop the pending flag without a reply (the send was cancelled).
    pub fn abandon(&mut self) {
        self.awaiting_reply = false;
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The most recent user message, if any.
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| !m.is_from_assistant)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

fn assistant_message(text: String) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4().to_string(),
        text,
        is_from_assistant: true,
        timestamp: Utc::now(),
        attached_image: None,
    }
}
