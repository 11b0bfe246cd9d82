//! Session status state machine values.

use serde::{Deserialize, Serialize};

/// Lifecycle of the voice conversation as seen by the step navigator.
///
/// This is the single source of truth for the view: every screen is
/// derived from it rather than from combinations of flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SessionStatus {
    /// No recipe selected
    #[default]
    Idle,

    /// Recipe selected, no session open
    Ready,

    /// Session is being opened
    Connecting,

    /// Session is live
    Connected,

    /// Session ended by the SDK or the user
    Disconnected,

    /// Terminal until the user retries
    Error { message: String },
}

impl SessionStatus {
    /// Convert to the short string used in logs and listings
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Ready => "ready",
            SessionStatus::Connecting => "connecting",
            SessionStatus::Connected => "connected",
            SessionStatus::Disconnected => "disconnected",
            SessionStatus::Error { .. } => "error",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, SessionStatus::Connected)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SessionStatus::Error { .. })
    }
}
