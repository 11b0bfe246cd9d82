//! Interactive text-mode cooking session.

use anyhow::{anyhow, Context, Result};
use log::warn;
use remy_core::{
    display::{OperationStatus, StepCard, Transcript},
    models::{Recipe, SessionStatus},
    CookingError, SessionEvent, StepNavigator, ViewState,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{console::ConsoleConversation, renderer::TerminalRenderer};

const HELP: &str = "\
Commands:

- `/talk` start or stop the voice session
- `/next` and `/prev` move between steps
- `/transcript` show what was said on this step
- `/retry` start over after an error
- `/quit` leave

While the session is live, anything else you type is said to Remy.
";

const RETRY_HINT: &str = "Type /retry to start over.\n";

enum Input {
    Event(SessionEvent),
    Line(Option<String>),
}

/// Drives a [`StepNavigator`] from typed lines and session events.
pub struct CookingSession<'a> {
    navigator: StepNavigator<ConsoleConversation>,
    renderer: &'a TerminalRenderer,
}

impl<'a> CookingSession<'a> {
    pub fn new(
        sdk: ConsoleConversation,
        agent_id: impl Into<String>,
        renderer: &'a TerminalRenderer,
    ) -> Self {
        Self {
            navigator: StepNavigator::new(sdk, agent_id),
            renderer,
        }
    }

    /// Run until `/quit` or the end of `input`.
    pub async fn run<R>(mut self, recipe: Recipe, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.navigator
            .select_recipe(recipe.clone())
            .await
            .map_err(|e| anyhow!(e.user_message()))?;
        self.renderer.render(&recipe.to_string())?;
        self.renderer.render(&format!("\n{HELP}\n"))?;

        let mut lines = input.lines();
        loop {
            let input = tokio::select! {
                biased;
                Some(event) = self.navigator.next_event(), if self.navigator.is_session_open() => {
                    Input::Event(event)
                }
                line = lines.next_line() => Input::Line(line.context("Failed to read input")?),
            };

            match input {
                Input::Event(event) => self.on_event(event).await?,
                Input::Line(None) => break,
                Input::Line(Some(line)) => {
                    if !self.on_line(line.trim(), &recipe).await? {
                        break;
                    }
                }
            }
        }

        self.navigator.back_to_selection().await;
        Ok(())
    }

    async fn on_event(&mut self, event: SessionEvent) -> Result<()> {
        if let SessionEvent::Message(message) = &event {
            self.renderer.render(&message.to_string())?;
        }

        let before = self.snapshot();
        if let Err(e) = self.navigator.handle_event(event).await {
            warn!("Failed to apply session event: {e}");
        }
        self.render_if_changed(before)
    }

    /// Returns `false` when the session should end.
    async fn on_line(&mut self, line: &str, recipe: &Recipe) -> Result<bool> {
        let before = self.snapshot();
        let result = match line {
            "" => Ok(()),
            "/quit" | "/q" => return Ok(false),
            "/help" => {
                self.renderer.render(HELP)?;
                Ok(())
            }
            "/next" => self.navigator.next_step().await,
            "/prev" | "/back" => self.navigator.previous_step().await,
            "/talk" => self.navigator.toggle_session().await,
            "/transcript" => {
                let transcript = Transcript(self.navigator.messages()).to_string();
                self.renderer.render(&transcript)?;
                Ok(())
            }
            "/retry" => {
                self.navigator.retry().await;
                self.navigator.select_recipe(recipe.clone()).await
            }
            command if command.starts_with('/') => {
                self.renderer
                    .render(&format!("Unknown command `{command}`. Type /help.\n"))?;
                Ok(())
            }
            text if self.navigator.is_session_open() => self.navigator.sdk().speak(text),
            _ => {
                self.renderer
                    .render("_Type /talk to start the voice session first._\n")?;
                Ok(())
            }
        };

        if let Err(e) = result {
            if let Some(notice) = self.failure_notice(&e, &before) {
                self.renderer.render(&notice)?;
            }
        }
        self.render_if_changed(before)?;
        Ok(true)
    }

    /// What to print for a failed command. A failure that moved into the
    /// error state is shown by the error view instead.
    fn failure_notice(&self, err: &CookingError, before: &(usize, SessionStatus)) -> Option<String> {
        if !self.navigator.status().is_error() {
            Some(OperationStatus::failure(err.user_message()).to_string())
        } else if *before == self.snapshot() {
            Some(RETRY_HINT.to_string())
        } else {
            None
        }
    }

    fn snapshot(&self) -> (usize, SessionStatus) {
        (
            self.navigator.current_step_index(),
            self.navigator.status().clone(),
        )
    }

    fn render_if_changed(&self, before: (usize, SessionStatus)) -> Result<()> {
        if before != self.snapshot() {
            self.render_view()?;
        }
        Ok(())
    }

    fn render_view(&self) -> Result<()> {
        let card = |index| {
            self.navigator
                .active_recipe()
                .map(|recipe| StepCard::new(recipe, index).to_string())
                .unwrap_or_default()
        };

        let output = match self.navigator.view() {
            ViewState::RecipeSelection => "_No recipe selected._\n".to_string(),
            ViewState::Overview => format!(
                "{}\n_Type /talk to start the voice session._\n",
                card(self.navigator.current_step_index())
            ),
            ViewState::Starting => "_Connecting..._\n".to_string(),
            ViewState::Cooking { step_index } => card(step_index),
            ViewState::Error { message } => {
                format!("{}{RETRY_HINT}", OperationStatus::failure(message))
            }
        };
        self.renderer.render(&output)
    }
}
