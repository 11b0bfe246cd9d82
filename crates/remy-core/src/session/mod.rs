//! Voice conversation session management.
//!
//! The voice SDK is an external capability: it captures audio, recognises
//! speech, speaks the agent's answers and reports what happened through
//! callbacks. This module models it as the [`VoiceConversation`] trait and
//! wraps it in a [`SessionManager`] that gives the step navigator a simple,
//! strictly sequential `open`/`close` contract.
//!
//! The SDK's four callbacks (connect, disconnect, message, error) are
//! delivered through a single [`EventSink`]. The manager creates a fresh
//! sink for every session and drops the previous one, so at any time there
//! is exactly one live registration and events of a closed session can
//! never reach the navigator.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

use crate::{context::ContextVariables, error::Result, models::ConversationMessage};

pub mod manager;
pub mod signed_url;

pub use manager::SessionManager;
pub use signed_url::SignedUrlClient;

/// Something the SDK reported about the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    Message(ConversationMessage),
    Error(String),
}

/// Parameters for opening a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequest {
    pub agent_id: String,
    pub context: ContextVariables,
}

/// The handler registration handed to the SDK for one session.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: UnboundedSender<SessionEvent>,
}

impl EventSink {
    pub(crate) fn new(sender: UnboundedSender<SessionEvent>) -> Self {
        Self { sender }
    }

    /// Emit an event. Returns `false` once the registration was dropped,
    /// i.e. the session this sink belongs to is over.
    pub fn emit(&self, event: SessionEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    pub fn connected(&self) -> bool {
        self.emit(SessionEvent::Connected)
    }

    pub fn disconnected(&self) -> bool {
        self.emit(SessionEvent::Disconnected)
    }

    pub fn message(&self, message: ConversationMessage) -> bool {
        self.emit(SessionEvent::Message(message))
    }

    pub fn error(&self, message: impl Into<String>) -> bool {
        self.emit(SessionEvent::Error(message.into()))
    }
}

/// A voice-conversation capability (SDK adapter).
///
/// Implementations report asynchronously through the [`EventSink`] given
/// to [`start_session`](VoiceConversation::start_session); in particular
/// the session counts as open only once `connected` has been emitted.
#[async_trait]
pub trait VoiceConversation: Send {
    /// Acquire the microphone. Fails with
    /// [`CookingError::MicrophoneUnavailable`](crate::CookingError::MicrophoneUnavailable)
    /// when permission is denied or capture is unsupported.
    async fn acquire_microphone(&mut self) -> Result<()>;

    /// Begin a session with the given agent and context.
    async fn start_session(&mut self, request: SessionRequest, events: EventSink) -> Result<()>;

    /// End the current session.
    async fn end_session(&mut self) -> Result<()>;
}
