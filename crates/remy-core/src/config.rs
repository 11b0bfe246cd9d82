//! Runtime configuration for the assistant's external services.

use std::time::Duration;

use crate::{
    error::{CookingError, Result},
    gateway::PollConfig,
};

/// Default endpoint that issues signed voice-conversation URLs.
pub const DEFAULT_SIGNED_URL_ENDPOINT: &str =
    "https://api.elevenlabs.io/v1/convai/conversation/get_signed_url";

/// Timeout applied to every outbound HTTP request. The parsing webhook can
/// take tens of seconds on large pages.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the voice agent, the parsing webhook and the polling loop.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Voice agent identifier passed when opening a session
    pub agent_id: Option<String>,
    /// API key for the signed-session endpoint
    pub elevenlabs_api_key: Option<String>,
    /// Recipe parsing webhook
    pub webhook_url: Option<String>,
    /// Endpoint issuing signed conversation URLs
    pub signed_url_endpoint: String,
    /// Timeout for outbound HTTP requests
    pub request_timeout: Duration,
    /// Polling bounds used while waiting for a parsed recipe
    pub poll: PollConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            agent_id: None,
            elevenlabs_api_key: None,
            webhook_url: None,
            signed_url_endpoint: DEFAULT_SIGNED_URL_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll: PollConfig::default(),
        }
    }
}

impl AssistantConfig {
    /// Agent identifier, required to open voice sessions.
    pub fn require_agent_id(&self) -> Result<&str> {
        require(self.agent_id.as_deref(), "agent ID is not set (REMY_AGENT_ID)")
    }

    /// API key, required by the signed-session endpoint.
    pub fn require_api_key(&self) -> Result<&str> {
        require(
            self.elevenlabs_api_key.as_deref(),
            "ElevenLabs API key is not set (ELEVENLABS_API_KEY)",
        )
    }

    /// Parsing webhook URL, required to submit recipes.
    pub fn require_webhook_url(&self) -> Result<&str> {
        require(
            self.webhook_url.as_deref(),
            "recipe webhook URL is not set (REMY_WEBHOOK_URL)",
        )
    }
}

fn require<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CookingError::Configuration {
            message: message.to_string(),
        }),
    }
}
