//! The step navigation controller.
//!
//! [`StepNavigator`] ties the active recipe, the voice session and spoken
//! commands together. It owns the only [`NavigationState`] and the
//! transcript of the current step; every mutation goes through `&mut self`,
//! so callers never observe a half-applied update and session open/close
//! calls are strictly sequential.
//!
//! Status transitions:
//!
//! ```text
//! Idle --select--> Ready --start--> Connecting --connected--> Connected
//! Connected --step change--> Connecting --> Connected
//! Connected --stop / SDK disconnect--> Disconnected
//! any --SDK error / failed open / loading failure--> Error --retry--> Idle
//! ```

use log::{debug, error, info, warn};

use crate::{
    context::{derive_context, ContextVariables},
    error::{CookingError, Result},
    interpreter::{interpret, NavigationIntent},
    models::{ConversationMessage, Recipe, RecipeStep, SessionStatus},
    session::{SessionEvent, SessionManager, VoiceConversation},
};

pub mod state;

pub use state::{NavigationState, ViewState};

/// Drives guided cooking through one recipe.
pub struct StepNavigator<V> {
    state: NavigationState,
    messages: Vec<ConversationMessage>,
    session: SessionManager<V>,
    agent_id: String,
}

impl<V: VoiceConversation> StepNavigator<V> {
    pub fn new(sdk: V, agent_id: impl Into<String>) -> Self {
        Self::with_session(SessionManager::new(sdk), agent_id)
    }

    pub fn with_session(session: SessionManager<V>, agent_id: impl Into<String>) -> Self {
        Self {
            state: NavigationState::default(),
            messages: Vec::new(),
            session,
            agent_id: agent_id.into(),
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn status(&self) -> &SessionStatus {
        &self.state.status
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index
    }

    pub fn active_recipe(&self) -> Option<&Recipe> {
        self.state.active_recipe.as_ref()
    }

    pub fn current_step(&self) -> Option<&RecipeStep> {
        self.active_recipe()
            .and_then(|recipe| recipe.step(self.state.current_step_index))
    }

    /// Transcript of the current step, oldest first.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn view(&self) -> ViewState {
        self.state.view()
    }

    /// Whether a voice session is open and may still deliver events.
    pub fn is_session_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn sdk(&self) -> &V {
        self.session.sdk()
    }

    pub fn sdk_mut(&mut self) -> &mut V {
        self.session.sdk_mut()
    }

    /// Context for the current step, if a recipe is active.
    pub fn context(&self) -> Option<ContextVariables> {
        let recipe = self.active_recipe()?;
        derive_context(recipe, self.state.current_step_index).ok()
    }

    /// Adopt `recipe` as the active recipe.
    ///
    /// A recipe that fails [`Recipe::validate`] is refused and nothing
    /// changes, as is any selection while in the error state. Otherwise any
    /// open session is closed, the step index resets to 0, the transcript is
    /// cleared and the status becomes `Ready`.
    pub async fn select_recipe(&mut self, recipe: Recipe) -> Result<()> {
        self.ensure_not_failed("selecting a recipe")?;
        if let Err(e) = recipe.validate() {
            warn!("Refusing to select recipe {}: {e}", recipe.id);
            return Err(e);
        }

        self.close_quietly().await;
        info!("Selected recipe '{}' ({} steps)", recipe.title, recipe.step_count());
        self.state = NavigationState::ready(recipe.ordered());
        self.messages.clear();
        Ok(())
    }

    /// Move to `target_index`, clamped to the recipe's steps.
    ///
    /// Staying on the same step is a no-op. A connected session is closed
    /// before the index moves and reopened with the new step's context
    /// afterwards; the transcript is cleared on every move.
    pub async fn change_step(&mut self, target_index: usize) -> Result<()> {
        self.ensure_not_failed("changing steps")?;
        let step_count = self.state.step_count();
        if step_count == 0 {
            return Ok(());
        }

        let target = target_index.min(step_count - 1);
        if target == self.state.current_step_index {
            debug!("Already on step {}", target + 1);
            return Ok(());
        }

        let was_connected = self.state.status.is_connected();
        if was_connected {
            self.set_status(SessionStatus::Connecting);
            self.close_quietly().await;
        }

        self.state.current_step_index = target;
        self.messages.clear();
        debug!("Moved to step {} of {step_count}", target + 1);

        if was_connected {
            self.open_session().await
        } else {
            Ok(())
        }
    }

    pub async fn next_step(&mut self) -> Result<()> {
        self.navigate(NavigationIntent::Next).await
    }

    pub async fn previous_step(&mut self) -> Result<()> {
        self.navigate(NavigationIntent::Previous).await
    }

    async fn navigate(&mut self, intent: NavigationIntent) -> Result<()> {
        match intent.target(self.state.current_step_index) {
            Some(target) => self.change_step(target).await,
            None => Ok(()),
        }
    }

    /// Stop a connected session, otherwise start one.
    pub async fn toggle_session(&mut self) -> Result<()> {
        if self.state.status.is_connected() {
            self.stop_session().await
        } else {
            self.start_session().await
        }
    }

    /// Open a voice session for the current step.
    ///
    /// Any failure leaves the status at `Error` with a readable message and
    /// is also returned. From `Error` only [`retry`](Self::retry) moves on.
    pub async fn start_session(&mut self) -> Result<()> {
        if self.state.active_recipe.is_none() {
            return Err(CookingError::invalid_input("recipe").with_reason("no recipe selected"));
        }
        self.ensure_not_failed("starting a new session")?;
        if self.state.status.is_connected() {
            return Ok(());
        }

        self.open_session().await
    }

    /// End the session. The recipe stays selected.
    pub async fn stop_session(&mut self) -> Result<()> {
        let result = self.session.close().await;
        self.mark_disconnected();
        result
    }

    /// Apply one event reported by the voice SDK.
    ///
    /// Messages are recorded first and then checked for a navigation
    /// command, so a command that moves the step leaves an empty transcript.
    pub async fn handle_event(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Connected => {
                if matches!(self.state.status, SessionStatus::Connecting) {
                    self.set_status(SessionStatus::Connected);
                }
                Ok(())
            }
            SessionEvent::Disconnected => {
                info!("Voice session disconnected");
                self.mark_disconnected();
                Ok(())
            }
            SessionEvent::Message(message) => {
                let intent = interpret(&message);
                self.messages.push(message);
                match intent {
                    Some(intent) if self.state.status.is_error() => {
                        debug!("Ignoring voice command {intent:?} while in error state");
                        Ok(())
                    }
                    Some(intent) => {
                        info!("Voice command {intent:?} on step {}", self.state.current_step_index + 1);
                        self.navigate(intent).await
                    }
                    None => Ok(()),
                }
            }
            SessionEvent::Error(message) => {
                let err = CookingError::session(message);
                error!("Voice session failed: {err}");
                self.close_quietly().await;
                self.set_status(SessionStatus::Error {
                    message: err.user_message(),
                });
                Ok(())
            }
        }
    }

    /// Wait for the next SDK event without applying it.
    ///
    /// Cancel-safe, so it can race user input in `tokio::select!`; pass the
    /// event to [`handle_event`](Self::handle_event) afterwards. Returns
    /// `None` when no session is delivering events.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let event = self.session.next_event().await;
        if event.is_none() {
            self.mark_disconnected();
        }
        event
    }

    /// Wait for the next SDK event and apply it.
    pub async fn pump_event(&mut self) -> Result<Option<SessionEvent>> {
        match self.next_event().await {
            Some(event) => {
                self.handle_event(event.clone()).await?;
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Report a store or gateway failure while loading a recipe.
    ///
    /// Any open session is closed first; the active recipe is left untouched.
    pub async fn fail_loading(&mut self, err: &CookingError) {
        error!("Recipe loading failed: {err}");
        self.close_quietly().await;
        self.set_status(SessionStatus::Error {
            message: err.user_message(),
        });
    }

    /// Leave the error state. Resets all the way to `Idle` so the recipe
    /// must be selected (and validated) again.
    pub async fn retry(&mut self) {
        info!("Retrying from {}", self.state.status.as_str());
        self.back_to_selection().await;
    }

    /// Close any session and return to the initial state.
    pub async fn back_to_selection(&mut self) {
        self.close_quietly().await;
        self.state = NavigationState::default();
        self.messages.clear();
    }

    async fn open_session(&mut self) -> Result<()> {
        let context = match self.active_recipe() {
            Some(recipe) => derive_context(recipe, self.state.current_step_index)?,
            None => {
                return Err(CookingError::invalid_input("recipe").with_reason("no recipe selected"))
            }
        };

        self.set_status(SessionStatus::Connecting);
        match self.session.open(&self.agent_id, context).await {
            Ok(()) => {
                self.set_status(SessionStatus::Connected);
                Ok(())
            }
            Err(e) => {
                error!("Failed to open voice session: {e}");
                self.set_status(SessionStatus::Error {
                    message: e.user_message(),
                });
                Err(e)
            }
        }
    }

    fn ensure_not_failed(&self, action: &str) -> Result<()> {
        if self.state.status.is_error() {
            return Err(CookingError::session(format!("retry before {action}")));
        }
        Ok(())
    }

    fn set_status(&mut self, status: SessionStatus) {
        if self.state.status != status {
            debug!("Session status {} -> {}", self.state.status.as_str(), status.as_str());
        }
        self.state.status = status;
    }

    fn mark_disconnected(&mut self) {
        if matches!(
            self.state.status,
            SessionStatus::Connected | SessionStatus::Connecting
        ) {
            self.set_status(SessionStatus::Disconnected);
        }
    }

    async fn close_quietly(&mut self) {
        if let Err(e) = self.session.close().await {
            warn!("Failed to close voice session: {e}");
        }
    }
}
