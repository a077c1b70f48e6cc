//! Conversation transcript data model

pub mod store;

pub use store::{TranscriptStore, TranscriptSummary};

use serde::{Deserialize, Serialize};

/// Role of a message author.
///
/// The set is closed: transcripts containing any other role string fail to
/// deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The prompt that frames the whole conversation
    System,
    /// A human turn
    User,
    /// A model reply
    Assistant,
}

/// A single chat message, immutable once appended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message author role
    pub role: Role,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Content clipped to `max_chars` characters for display, with a
    /// trailing ellipsis when clipped
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let clipped: String = self.content.chars().take(max_chars).collect();
        format!("{}...", clipped)
    }
}

/// An ordered conversation transcript.
///
/// The first message, when present, is the single system prompt: it is set
/// at construction and never reordered or removed. On disk and on the wire
/// a conversation is a plain JSON array of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation opening with a system prompt
    pub fn with_system_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(prompt)],
        }
    }

    /// Append a user message
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Splice a loaded transcript into this conversation.
    ///
    /// The loaded messages keep their relative order. System entries inside
    /// the loaded transcript are dropped so the conversation keeps exactly
    /// one system message, first.
    pub fn splice(&mut self, loaded: Conversation) {
        self.messages.extend(
            loaded
                .messages
                .into_iter()
                .filter(|m| m.role != Role::System),
        );
    }

    /// All messages in order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no messages have been recorded
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Count of messages with the given role
    pub fn count_role(&self, role: Role) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
