//! Conversation transcript messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who produced a transcript message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    /// The voice agent
    Assistant,

    /// The person cooking
    User,
}

impl MessageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSource::Assistant => "assistant",
            MessageSource::User => "user",
        }
    }
}

impl FromStr for MessageSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "assistant" | "ai" => Ok(MessageSource::Assistant),
            "user" => Ok(MessageSource::User),
            _ => Err(format!("Invalid message source: {s}")),
        }
    }
}

/// A single transcript entry from the voice conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationMessage {
    pub source: MessageSource,
    pub message: String,
}

impl ConversationMessage {
    pub fn user(message: impl Into<String>) -> Self {
        Self {
            source: MessageSource::User,
            message: message.into(),
        }
    }

    pub fn assistant(message: impl Into<String>) -> Self {
        Self {
            source: MessageSource::Assistant,
            message: message.into(),
        }
    }
}
