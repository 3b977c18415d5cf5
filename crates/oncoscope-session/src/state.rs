use oncoscope_core::form::FormState;
use oncoscope_core::models::chat::{ChatMessage, Conversation};
use oncoscope_core::models::prediction::Prediction;
use serde::Serialize;
use uuid::Uuid;

/// Where the submission pipeline stands.
///
/// A failed prediction falls back to `Idle`; a failed chat start stops at
/// `Predicted` with no conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Submitting,
    Predicted,
    ChatReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Form incomplete or another operation in flight. Nothing was sent.
    Ignored,
    /// The session was cleared or resubmitted while waiting; the response
    /// was discarded.
    Superseded,
    /// Prediction stored and chat thread opened.
    ChatReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank text, no thread yet, or another operation in flight.
    Ignored,
    Superseded,
    /// Assistant reply appended.
    Replied,
}

/// Mutable state behind the controller's lock.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub form: FormState,
    pub prediction: Option<Prediction>,
    pub conversation: Conversation,
    pub phase: SessionPhase,
    pub busy: bool,
    pub generation: u64,
}

/// Owned copy of the session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub generation: u64,
    pub phase: SessionPhase,
    pub busy: bool,
    pub schema_loaded: bool,
    /// Form complete and nothing in flight.
    pub can_submit: bool,
    pub prediction: Option<Prediction>,
    pub thread_id: Option<String>,
    pub messages: Vec<ChatMessage>,
}

impl SessionState {
    pub fn snapshot(&self, session_id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            generation: self.generation,
            phase: self.phase,
            busy: self.busy,
            schema_loaded: self.form.schema().is_some(),
            can_submit: self.form.is_valid() && !self.busy,
            prediction: self.prediction.clone(),
            thread_id: self.conversation.thread_id().map(str::to_string),
            messages: self.conversation.messages().to_vec(),
        }
    }
}
