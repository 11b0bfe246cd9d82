//! Text-mode stand-in for the voice SDK.
//!
//! Typed lines play the part of recognised speech and the narration is
//! printed instead of spoken. It satisfies the same [`VoiceConversation`]
//! contract as an audio SDK, so the navigator cannot tell the difference.

use async_trait::async_trait;
use log::debug;
use remy_core::{
    context::{CURRENT_INSTRUCTION, CURRENT_STEP, TOTAL_STEPS},
    models::ConversationMessage,
    CookingError, EventSink, Result, SessionRequest, VoiceConversation,
};

#[derive(Default)]
pub struct ConsoleConversation {
    events: Option<EventSink>,
}

impl ConsoleConversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a typed line as user speech to the live session.
    pub fn speak(&self, text: &str) -> Result<()> {
        match &self.events {
            Some(events) if events.message(ConversationMessage::user(text)) => Ok(()),
            _ => Err(CookingError::session("no live session to talk to")),
        }
    }
}

/// What the assistant says when a session opens on a step.
pub fn narration(request: &SessionRequest) -> String {
    let value = |key| request.context.get(key).unwrap_or_default();
    format!(
        "Step {} of {}: {}",
        value(CURRENT_STEP),
        value(TOTAL_STEPS),
        value(CURRENT_INSTRUCTION)
    )
}

#[async_trait]
impl VoiceConversation for ConsoleConversation {
    async fn acquire_microphone(&mut self) -> Result<()> {
        Ok(())
    }

    async fn start_session(&mut self, request: SessionRequest, events: EventSink) -> Result<()> {
        debug!(
            "Console session for agent {}:\n{}",
            request.agent_id,
            request.context.prompt()
        );
        events.connected();
        events.message(ConversationMessage::assistant(narration(&request)));
        self.events = Some(events);
        Ok(())
    }

    async fn end_session(&mut self) -> Result<()> {
        if let Some(events) = self.events.take() {
            events.disconnected();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use remy_core::{derive_context, models::Recipe};

    use super::*;

    fn request() -> SessionRequest {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "title": "Tea",
                "recipe_steps": [
                    { "step_number": 1, "instruction": "Boil water" },
                    { "step_number": 2, "instruction": "Steep the leaves" }
                ]
            }"#,
        )
        .unwrap();
        SessionRequest {
            agent_id: "console".to_string(),
            context: derive_context(&recipe, 1).unwrap(),
        }
    }

    #[test]
    fn test_narration_reads_current_step() {
        assert_eq!(narration(&request()), "Step 2 of 2: Steep the leaves");
    }

    #[test]
    fn test_speak_without_session_fails() {
        let console = ConsoleConversation::new();
        assert!(console.speak("hello").is_err());
    }
}
