use async_trait::async_trait;
use remy_core::{
    context::CURRENT_STEP,
    models::{ConversationMessage, Recipe, SessionStatus},
    CookingError, EventSink, Result, SessionEvent, SessionRequest, StepNavigator, ViewState,
    VoiceConversation,
};

mod common;

use common::sample_recipe;

const AGENT: &str = "agent-remy";

/// In-memory voice SDK that connects immediately unless told otherwise.
#[derive(Default)]
struct ScriptedSdk {
    deny_microphone: bool,
    fail_next_start: Option<String>,
    sink: Option<EventSink>,
    requests: Vec<SessionRequest>,
    ends: usize,
}

#[async_trait]
impl VoiceConversation for ScriptedSdk {
    async fn acquire_microphone(&mut self) -> Result<()> {
        if self.deny_microphone {
            return Err(CookingError::MicrophoneUnavailable {
                message: "permission denied".to_string(),
            });
        }
        Ok(())
    }

    async fn start_session(&mut self, request: SessionRequest, events: EventSink) -> Result<()> {
        self.requests.push(request);
        match self.fail_next_start.take() {
            Some(message) => {
                events.error(message);
            }
            None => {
                events.connected();
            }
        }
        self.sink = Some(events);
        Ok(())
    }

    async fn end_session(&mut self) -> Result<()> {
        self.ends += 1;
        self.sink = None;
        Ok(())
    }
}

fn navigator() -> StepNavigator<ScriptedSdk> {
    StepNavigator::new(ScriptedSdk::default(), AGENT)
}

fn three_steps() -> Recipe {
    sample_recipe("r1", "Risotto", "https://example.com/risotto", 3)
}

fn sink(navigator: &StepNavigator<ScriptedSdk>) -> EventSink {
    navigator
        .sdk()
        .sink
        .clone()
        .expect("A session should be live")
}

async fn say(navigator: &mut StepNavigator<ScriptedSdk>, text: &str) {
    assert!(sink(navigator).message(ConversationMessage::user(text)));
    navigator
        .pump_event()
        .await
        .expect("Event should apply")
        .expect("An event should be delivered");
}

fn requested_step(navigator: &StepNavigator<ScriptedSdk>, request: usize) -> &str {
    navigator.sdk().requests[request]
        .context
        .get(CURRENT_STEP)
        .expect("Context should carry the current step")
}

#[tokio::test]
async fn test_select_recipe_resets_state() {
    let mut navigator = navigator();
    assert_eq!(navigator.view(), ViewState::RecipeSelection);

    navigator.select_recipe(three_steps()).await.unwrap();

    assert_eq!(navigator.status(), &SessionStatus::Ready);
    assert_eq!(navigator.current_step_index(), 0);
    assert!(navigator.messages().is_empty());
    assert_eq!(navigator.view(), ViewState::Overview);
    assert_eq!(
        navigator.current_step().map(|s| s.instruction.as_str()),
        Some("Do step 1")
    );
}

#[tokio::test]
async fn test_recipe_without_steps_is_rejected() {
    let mut navigator = navigator();
    let empty = sample_recipe("empty", "Nothing", "", 0);

    let result = navigator.select_recipe(empty.clone()).await;
    assert!(matches!(result, Err(CookingError::InvalidRecipe { .. })));
    assert!(navigator.active_recipe().is_none());
    assert_eq!(navigator.status(), &SessionStatus::Idle);

    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.next_step().await.unwrap();
    assert!(navigator.select_recipe(empty).await.is_err());
    assert_eq!(navigator.active_recipe().unwrap().id, "r1");
    assert_eq!(navigator.current_step_index(), 1);
}

#[tokio::test]
async fn test_step_index_is_clamped() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();

    navigator.previous_step().await.unwrap();
    assert_eq!(navigator.current_step_index(), 0);

    navigator.change_step(10).await.unwrap();
    assert_eq!(navigator.current_step_index(), 2);

    navigator.next_step().await.unwrap();
    assert_eq!(navigator.current_step_index(), 2);

    for target in [1, 0, 0, 7, 2, 1, usize::MAX] {
        navigator.change_step(target).await.unwrap();
        assert!(navigator.current_step_index() < 3);
    }
    assert_eq!(navigator.current_step_index(), 2);
}

#[tokio::test]
async fn test_step_change_without_session_clears_messages() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator
        .handle_event(SessionEvent::Message(ConversationMessage::assistant(
            "Start by toasting the rice",
        )))
        .await
        .unwrap();
    assert_eq!(navigator.messages().len(), 1);

    navigator.next_step().await.unwrap();

    assert!(navigator.messages().is_empty());
    assert_eq!(navigator.status(), &SessionStatus::Ready);
    assert!(navigator.sdk().requests.is_empty());
}

#[tokio::test]
async fn test_boundary_step_change_keeps_messages() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator
        .handle_event(SessionEvent::Message(ConversationMessage::assistant("Hi")))
        .await
        .unwrap();

    navigator.previous_step().await.unwrap();

    assert_eq!(navigator.messages().len(), 1);
}

#[tokio::test]
async fn test_start_session_sends_step_context() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();

    navigator.start_session().await.unwrap();

    assert_eq!(navigator.status(), &SessionStatus::Connected);
    assert_eq!(navigator.view(), ViewState::Cooking { step_index: 0 });
    assert_eq!(navigator.sdk().requests.len(), 1);
    assert_eq!(navigator.sdk().requests[0].agent_id, AGENT);
    assert_eq!(requested_step(&navigator, 0), "1");
}

#[tokio::test]
async fn test_step_change_restarts_connected_session() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.start_session().await.unwrap();

    navigator.next_step().await.unwrap();

    assert_eq!(navigator.status(), &SessionStatus::Connected);
    assert_eq!(navigator.sdk().ends, 1);
    assert_eq!(navigator.sdk().requests.len(), 2);
    assert_eq!(requested_step(&navigator, 1), "2");
}

#[tokio::test]
async fn test_restarted_context_is_deterministic() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.start_session().await.unwrap();
    navigator.next_step().await.unwrap();
    navigator.previous_step().await.unwrap();

    let requests = &navigator.sdk().requests;
    assert_eq!(requests.len(), 3);
    assert_eq!(
        serde_json::to_string(&requests[0]).unwrap(),
        serde_json::to_string(&requests[2]).unwrap()
    );
}

#[tokio::test]
async fn test_voice_next_step() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.change_step(1).await.unwrap();
    navigator.start_session().await.unwrap();

    say(&mut navigator, "next step now").await;

    assert_eq!(navigator.current_step_index(), 2);
    assert!(navigator.messages().is_empty());
    assert_eq!(navigator.status(), &SessionStatus::Connected);
    assert_eq!(requested_step(&navigator, 1), "3");
}

#[tokio::test]
async fn test_voice_go_back() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.change_step(2).await.unwrap();
    navigator.start_session().await.unwrap();

    say(&mut navigator, "Can you repeat, go back please").await;

    assert_eq!(navigator.current_step_index(), 1);
    assert!(navigator.messages().is_empty());
}

#[tokio::test]
async fn test_assistant_command_phrase_is_only_transcript() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.change_step(1).await.unwrap();
    navigator.start_session().await.unwrap();

    assert!(sink(&navigator).message(ConversationMessage::assistant("go back")));
    navigator.pump_event().await.unwrap();
    say(&mut navigator, "how long does it simmer?").await;

    assert_eq!(navigator.current_step_index(), 1);
    assert_eq!(navigator.messages().len(), 2);
    assert_eq!(navigator.sdk().requests.len(), 1);
}

#[tokio::test]
async fn test_voice_command_at_last_step_is_recorded() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.change_step(2).await.unwrap();
    navigator.start_session().await.unwrap();

    say(&mut navigator, "next step").await;

    assert_eq!(navigator.current_step_index(), 2);
    assert_eq!(navigator.messages(), &[ConversationMessage::user("next step")]);
    assert_eq!(navigator.sdk().ends, 0);
}

#[tokio::test]
async fn test_microphone_denied_requires_retry() {
    let mut navigator = StepNavigator::new(
        ScriptedSdk {
            deny_microphone: true,
            ..Default::default()
        },
        AGENT,
    );
    navigator.select_recipe(three_steps()).await.unwrap();

    let result = navigator.start_session().await;
    assert!(matches!(result, Err(CookingError::MicrophoneUnavailable { .. })));
    match navigator.view() {
        ViewState::Error { message } => assert!(message.starts_with("Microphone access failed")),
        other => panic!("expected error view, got {other:?}"),
    }

    assert!(navigator.start_session().await.is_err());

    navigator.retry().await;
    assert_eq!(navigator.status(), &SessionStatus::Idle);
    assert!(navigator.active_recipe().is_none());
    assert_eq!(navigator.view(), ViewState::RecipeSelection);
}

#[tokio::test]
async fn test_sdk_error_event_sets_error() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.start_session().await.unwrap();

    assert!(sink(&navigator).error("websocket closed"));
    navigator.pump_event().await.unwrap();

    assert_eq!(
        navigator.status(),
        &SessionStatus::Error {
            message: "Connection error: websocket closed".to_string()
        }
    );
    assert!(!navigator.is_session_open());
}

#[tokio::test]
async fn test_failed_reopen_after_step_change() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.start_session().await.unwrap();
    navigator.sdk_mut().fail_next_start = Some("agent busy".to_string());

    let result = navigator.next_step().await;

    assert!(result.is_err());
    assert_eq!(navigator.current_step_index(), 1);
    assert!(navigator.status().is_error());
    assert!(!navigator.is_session_open());
}

#[tokio::test]
async fn test_disconnect_and_toggle() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.toggle_session().await.unwrap();
    assert_eq!(navigator.status(), &SessionStatus::Connected);

    assert!(sink(&navigator).disconnected());
    navigator.pump_event().await.unwrap();
    assert_eq!(navigator.status(), &SessionStatus::Disconnected);
    assert_eq!(navigator.view(), ViewState::Overview);

    navigator.toggle_session().await.unwrap();
    assert_eq!(navigator.status(), &SessionStatus::Connected);

    navigator.toggle_session().await.unwrap();
    assert_eq!(navigator.status(), &SessionStatus::Disconnected);
    assert!(!navigator.is_session_open());
    assert_eq!(navigator.sdk().requests.len(), 2);
}

#[tokio::test]
async fn test_loading_failure_keeps_active_recipe() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();

    navigator
        .fail_loading(&CookingError::ParseTimeout { attempts: 30 })
        .await;

    assert_eq!(
        navigator.view(),
        ViewState::Error {
            message: "The recipe is taking too long to process. Please try again.".to_string()
        }
    );
    assert_eq!(navigator.active_recipe().unwrap().id, "r1");
}

#[tokio::test]
async fn test_loading_failure_closes_live_session() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.start_session().await.unwrap();

    navigator
        .fail_loading(&CookingError::ParseTimeout { attempts: 30 })
        .await;

    assert!(navigator.status().is_error());
    assert!(!navigator.is_session_open());
    assert_eq!(navigator.sdk().ends, 1);

    navigator
        .handle_event(SessionEvent::Message(ConversationMessage::user("next step")))
        .await
        .unwrap();

    assert_eq!(navigator.current_step_index(), 0);
    assert!(navigator.status().is_error());
    assert_eq!(navigator.sdk().requests.len(), 1);
}

#[tokio::test]
async fn test_error_state_requires_retry() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator
        .fail_loading(&CookingError::ParseTimeout { attempts: 30 })
        .await;

    let selected = navigator.select_recipe(three_steps()).await;
    assert!(matches!(selected, Err(CookingError::Session { .. })));
    assert!(matches!(
        navigator.change_step(1).await,
        Err(CookingError::Session { .. })
    ));
    assert!(navigator.next_step().await.is_err());
    assert_eq!(navigator.current_step_index(), 0);
    assert!(navigator.status().is_error());

    navigator.retry().await;
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.change_step(1).await.unwrap();
    assert_eq!(navigator.status(), &SessionStatus::Ready);
    assert_eq!(navigator.current_step_index(), 1);
}

#[tokio::test]
async fn test_back_to_selection_closes_session() {
    let mut navigator = navigator();
    navigator.select_recipe(three_steps()).await.unwrap();
    navigator.start_session().await.unwrap();

    navigator.back_to_selection().await;

    assert_eq!(navigator.sdk().ends, 1);
    assert_eq!(navigator.view(), ViewState::RecipeSelection);
    assert!(navigator.messages().is_empty());
}
