//! Sequential open/close wrapper over a [`VoiceConversation`].

use std::{collections::VecDeque, time::Duration};

use log::{debug, warn};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
    time::timeout,
};

use super::{EventSink, SessionEvent, SessionRequest, VoiceConversation};
use crate::{
    context::ContextVariables,
    error::{CookingError, Result},
};

/// How long `open` waits for the SDK to report a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Owns the SDK and the single live event registration.
///
/// All operations take `&mut self`, so an `open` can never overlap a
/// pending `close`: two sessions never compete for the microphone.
pub struct SessionManager<V> {
    sdk: V,
    events: Option<UnboundedReceiver<SessionEvent>>,
    pending: VecDeque<SessionEvent>,
    open: bool,
    connect_timeout: Duration,
}

impl<V: VoiceConversation> SessionManager<V> {
    pub fn new(sdk: V) -> Self {
        Self {
            sdk,
            events: None,
            pending: VecDeque::new(),
            open: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn sdk(&self) -> &V {
        &self.sdk
    }

    pub fn sdk_mut(&mut self) -> &mut V {
        &mut self.sdk
    }

    /// Open a session and resolve once the SDK reports it connected.
    ///
    /// An already open session is closed first. Rejects when the microphone
    /// is unavailable, when the SDK fails to start, or when it reports an
    /// error or a disconnect before connecting.
    pub async fn open(&mut self, agent_id: &str, context: ContextVariables) -> Result<()> {
        if self.open {
            self.close().await?;
        }

        self.sdk.acquire_microphone().await?;

        // Replacing the registration drops the previous session's receiver
        let (sender, mut receiver) = unbounded_channel();
        self.events = None;
        self.pending.clear();

        let request = SessionRequest {
            agent_id: agent_id.to_string(),
            context,
        };
        if let Err(e) = self
            .sdk
            .start_session(request, EventSink::new(sender))
            .await
        {
            self.abandon_start().await;
            return Err(e);
        }

        let outcome = timeout(
            self.connect_timeout,
            wait_for_connect(&mut receiver, &mut self.pending),
        )
        .await
        .unwrap_or_else(|_| {
            Err(CookingError::session(format!(
                "no connection after {}s",
                self.connect_timeout.as_secs()
            )))
        });

        match outcome {
            Ok(()) => {
                debug!("Voice session connected for agent {agent_id}");
                self.events = Some(receiver);
                self.open = true;
                Ok(())
            }
            Err(e) => {
                self.abandon_start().await;
                Err(e)
            }
        }
    }

    /// Release the SDK after a start that never connected.
    async fn abandon_start(&mut self) {
        self.pending.clear();
        if let Err(e) = self.sdk.end_session().await {
            warn!("Failed to end session after failed start: {e}");
        }
    }

    /// Close the session. Closing a closed session is a no-op.
    pub async fn close(&mut self) -> Result<()> {
        if !self.open {
            self.events = None;
            self.pending.clear();
            return Ok(());
        }

        let result = self.sdk.end_session().await;
        self.events = None;
        self.pending.clear();
        self.open = false;
        debug!("Voice session closed");
        result
    }

    /// Next event of the live session, or `None` when there is none.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        let event = match self.pending.pop_front() {
            Some(event) => Some(event),
            None => match self.events.as_mut() {
                Some(receiver) => receiver.recv().await,
                None => None,
            },
        };

        match event {
            Some(SessionEvent::Disconnected) | Some(SessionEvent::Error(_)) => {
                self.open = false;
            }
            None => {
                self.open = false;
                self.events = None;
            }
            _ => {}
        }

        event
    }
}

/// Consume events until `Connected`, buffering early messages.
async fn wait_for_connect(
    receiver: &mut UnboundedReceiver<SessionEvent>,
    pending: &mut VecDeque<SessionEvent>,
) -> Result<()> {
    loop {
        match receiver.recv().await {
            Some(SessionEvent::Connected) => return Ok(()),
            Some(SessionEvent::Error(message)) => return Err(CookingError::session(message)),
            Some(SessionEvent::Disconnected) | None => {
                return Err(CookingError::session("session ended before it connected"));
            }
            Some(message @ SessionEvent::Message(_)) => pending.push_back(message),
        }
    }
}
