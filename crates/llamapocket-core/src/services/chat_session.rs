//! Chat session engine.
//!
//! Owns the conversation transcript and serializes generation requests:
//! one send may be pending at a time, and each assistant (or error) entry
//! lands immediately after its user entry. Inference failures never
//! escape [`ChatSession::send`]; they become error-flagged transcript
//! entries, keeping the conversation authoritative over a scroll of
//! dismissed toasts.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::ChatMessage;
use crate::errors::SessionError;
use crate::ports::InferenceClient;

/// Transcript text of a synthesized failure notice.
pub const GENERATION_FAILED_TEXT: &str =
    "Sorry, I had trouble generating a response. Please try again.";

/// Explicit state of the single generation slot.
enum Generation {
    Idle,
    InProgress { cancel: CancellationToken },
}

impl Generation {
    const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Mutable state guarded by the session's mutex.
struct SessionState {
    history: Vec<ChatMessage>,
    generation: Generation,
    next_message_id: u64,
}

impl SessionState {
    fn take_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }
}

/// Service owning one conversation against an inference backend.
///
/// Construct once and share (`Arc`) with the callers that need it; every
/// operation takes `&self`.
pub struct ChatSession {
    state: Mutex<SessionState>,
    client: Arc<dyn InferenceClient>,
}

impl ChatSession {
    /// Create an empty session over the given inference client.
    #[must_use]
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                history: Vec::new(),
                generation: Generation::Idle,
                next_message_id: 1,
            }),
            client,
        }
    }

    /// Send a prompt and await the assistant's turn.
    ///
    /// The prompt is trimmed first; a whitespace-only prompt fails with
    /// [`SessionError::EmptyPrompt`] before any state changes. A send
    /// while another is pending fails with [`SessionError::SessionBusy`],
    /// also without appending anything.
    ///
    /// Otherwise the user message is appended immediately and the client
    /// is awaited. On success the returned completion is appended as the
    /// assistant's turn; on any inference failure a fixed, error-flagged
    /// notice is appended instead. Both outcomes resolve `Ok` with the
    /// appended message. Cancellation via [`Self::cancel_generation`]
    /// appends nothing and resolves [`SessionError::Cancelled`].
    pub async fn send(&self, prompt: &str) -> Result<ChatMessage, SessionError> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyPrompt);
        }

        let cancel = {
            let mut state = self.state.lock().await;
            if !state.generation.is_idle() {
                return Err(SessionError::SessionBusy);
            }
            let cancel = CancellationToken::new();
            state.generation = Generation::InProgress {
                cancel: cancel.clone(),
            };
            let id = state.take_message_id();
            state.history.push(ChatMessage::user(id, trimmed));
            debug!(message_id = id, "user message appended");
            cancel
        };

        let outcome = tokio::select! {
            biased;

            () = cancel.cancelled() => None,

            result = self.client.complete(trimmed) => Some(result),
        };

        let mut state = self.state.lock().await;
        state.generation = Generation::Idle;
        match outcome {
            None => {
                debug!("generation cancelled; nothing appended");
                Err(SessionError::Cancelled)
            }
            Some(Ok(text)) => {
                let id = state.take_message_id();
                let message = ChatMessage::assistant(id, text);
                state.history.push(message.clone());
                debug!(message_id = id, "assistant message appended");
                Ok(message)
            }
            Some(Err(err)) => {
                warn!(error = %err, "generation failed; folding into transcript");
                let id = state.take_message_id();
                let message = ChatMessage::failure_notice(id, GENERATION_FAILED_TEXT);
                state.history.push(message.clone());
                Ok(message)
            }
        }
    }

    /// Cancel the pending generation, if any.
    ///
    /// The pending `send` resolves with [`SessionError::Cancelled`] and
    /// appends nothing. No-op when idle.
    pub async fn cancel_generation(&self) {
        let state = self.state.lock().await;
        if let Generation::InProgress { cancel } = &state.generation {
            debug!("cancelling generation");
            cancel.cancel();
        }
    }

    /// Empty the transcript.
    ///
    /// Does not touch a pending generation: its eventual assistant entry
    /// still appends to the now-empty history. Use
    /// [`Self::cancel_generation`] to abort it instead.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.history.clear();
        debug!("conversation cleared");
    }

    /// Snapshot of the transcript in conversation order.
    pub async fn history(&self) -> Vec<ChatMessage> {
        self.state.lock().await.history.clone()
    }

    /// Whether a generation request is outstanding.
    pub async fn is_pending(&self) -> bool {
        !self.state.lock().await.generation.is_idle()
    }
}
