use std::sync::Arc;

use oncoscope_client::backend::{ChatClient, PredictionClient, SchemaSource};
use oncoscope_client::error::ClientError;
use oncoscope_core::error::ValidationError;
use oncoscope_core::field::FieldSchema;
use oncoscope_core::form::FormState;
use oncoscope_core::models::chat::MAX_USER_TEXT_CHARS;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::SessionError;
use crate::state::{SendOutcome, SessionPhase, SessionSnapshot, SessionState, SubmitOutcome};

/// Drives one diagnostic session.
///
/// All methods take `&self`; share the controller through an `Arc` so a
/// front-end can `clear()` while a submission is still waiting on the
/// network. The state lock is never held across a network call.
pub struct SessionController {
    session_id: Uuid,
    predictor: Arc<dyn PredictionClient>,
    chat: Arc<dyn ChatClient>,
    state: Mutex<SessionState>,
}

impl SessionController {
    pub fn new(predictor: Arc<dyn PredictionClient>, chat: Arc<dyn ChatClient>) -> Self {
        let session_id = Uuid::new_v4();
        info!(session = %session_id, "session created");
        Self {
            session_id,
            predictor,
            chat,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    // ── Schema and form ──────────────────────────────────────────────────────

    /// Load the field schema from `source` and install it.
    ///
    /// On failure the current schema (if any) is left in place; a session
    /// that never loaded one cannot submit.
    pub async fn load_schema(&self, source: &dyn SchemaSource) -> Result<usize, SessionError> {
        let described = source.describe();
        info!(session = %self.session_id, source = %described, "loading field schema");

        let schema = source.load().await.map_err(|e| {
            warn!(session = %self.session_id, source = %described, error = %e, "schema load failed");
            SessionError::SchemaLoad(e)
        })?;

        let fields = schema.len();
        self.set_schema(schema).await;
        Ok(fields)
    }

    /// Install a schema. All values reset to absent. An in-flight pipeline
    /// keeps running and its result still applies.
    pub async fn set_schema(&self, schema: FieldSchema) {
        let mut state = self.state.lock().await;
        info!(session = %self.session_id, fields = schema.len(), "schema installed");
        state.form.set_schema(schema);
    }

    pub async fn set_value(&self, key: &str, value: Option<f64>) -> Result<(), SessionError> {
        Ok(self.state.lock().await.form.set_value(key, value)?)
    }

    pub async fn set_text(&self, key: &str, raw: &str) -> Result<(), SessionError> {
        Ok(self.state.lock().await.form.set_text(key, raw)?)
    }

    pub async fn patch_many(&self, patch: Vec<(String, f64)>) -> usize {
        self.state.lock().await.form.patch_many(patch)
    }

    /// Pre-fill every field that has a numeric hint.
    pub async fn fill_example(&self) -> usize {
        self.state.lock().await.form.prefill_example()
    }

    /// Clear form values only.
    pub async fn reset_form(&self) {
        self.state.lock().await.form.reset();
    }

    pub async fn form(&self) -> FormState {
        self.state.lock().await.form.clone()
    }

    pub async fn missing_fields(&self) -> Vec<String> {
        self.state.lock().await.form.missing_keys()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.lock().await.snapshot(self.session_id)
    }

    // ── Submission pipeline ──────────────────────────────────────────────────

    /// Predict from the current form, then open a chat thread on the result.
    ///
    /// A chat-start failure keeps the prediction: the caller gets
    /// `SessionError::Chat` and the session rests in `Predicted`.
    pub async fn submit(&self) -> Result<SubmitOutcome, SessionError> {
        let (generation, features) = {
            let mut state = self.state.lock().await;

            if state.busy {
                debug!(session = %self.session_id, "submit ignored: operation in flight");
                return Ok(SubmitOutcome::Ignored);
            }
            if !state.form.is_valid() {
                debug!(
                    session = %self.session_id,
                    missing = ?state.form.missing_keys(),
                    "submit ignored: form incomplete"
                );
                return Ok(SubmitOutcome::Ignored);
            }

            state.generation += 1;
            state.busy = true;
            state.prediction = None;
            state.conversation.clear();
            state.phase = SessionPhase::Submitting;

            match state.form.to_vector() {
                Ok(features) => (state.generation, features),
                Err(e) => {
                    state.busy = false;
                    state.phase = SessionPhase::Idle;
                    warn!(session = %self.session_id, error = %e, "form changed before submit");
                    return Err(e.into());
                }
            }
        };

        info!(
            session = %self.session_id,
            generation,
            features = features.len(),
            "submitting for prediction"
        );

        let predicted = self.predictor.predict(features).await.and_then(|prediction| {
            if prediction.has_valid_confidence() {
                Ok(prediction)
            } else {
                Err(ClientError::InvalidResponse(format!(
                    "confidence {} is outside [0, 1]",
                    prediction.confidence
                )))
            }
        });

        let prediction = {
            let mut state = self.state.lock().await;
            if state.generation != generation {
                debug!(session = %self.session_id, generation, "discarding stale prediction");
                return Ok(SubmitOutcome::Superseded);
            }

            match predicted {
                Ok(prediction) => {
                    info!(
                        session = %self.session_id,
                        generation,
                        diagnosis = %prediction.diagnosis,
                        confidence = prediction.confidence,
                        "prediction received"
                    );
                    state.prediction = Some(prediction.clone());
                    state.phase = SessionPhase::Predicted;
                    prediction
                }
                Err(e) => {
                    warn!(session = %self.session_id, generation, error = %e, "prediction failed");
                    state.busy = false;
                    state.phase = SessionPhase::Idle;
                    return Err(SessionError::Prediction(e));
                }
            }
        };

        let started = self
            .chat
            .start_chat(prediction.diagnosis, prediction.confidence)
            .await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(session = %self.session_id, generation, "discarding stale chat start");
            return Ok(SubmitOutcome::Superseded);
        }
        state.busy = false;

        match started {
            Ok(started) => {
                info!(
                    session = %self.session_id,
                    generation,
                    thread_id = %started.thread_id,
                    "chat thread started"
                );
                state.conversation.start(started.thread_id, &started.message);
                state.phase = SessionPhase::ChatReady;
                Ok(SubmitOutcome::ChatReady)
            }
            Err(e) => {
                warn!(
                    session = %self.session_id,
                    generation,
                    error = %e,
                    "chat start failed; keeping prediction"
                );
                state.phase = SessionPhase::Predicted;
                Err(SessionError::Chat(e))
            }
        }
    }

    // ── Conversation ─────────────────────────────────────────────────────────

    /// Send one user message on the current thread.
    ///
    /// The user message is appended before the request goes out and stays
    /// in the history even if the request fails.
    pub async fn send_message(&self, text: &str) -> Result<SendOutcome, SessionError> {
        let text = text.trim();

        let (generation, thread_id) = {
            let mut state = self.state.lock().await;

            let Some(thread_id) = state.conversation.thread_id().map(str::to_string) else {
                debug!(session = %self.session_id, "message ignored: no chat thread");
                return Ok(SendOutcome::Ignored);
            };
            if state.busy || text.is_empty() {
                debug!(session = %self.session_id, busy = state.busy, "message ignored");
                return Ok(SendOutcome::Ignored);
            }

            let len = text.chars().count();
            if len > MAX_USER_TEXT_CHARS {
                return Err(ValidationError::MessageTooLong {
                    len,
                    max: MAX_USER_TEXT_CHARS,
                }
                .into());
            }

            state.conversation.push_user(text);
            state.busy = true;
            (state.generation, thread_id)
        };

        let replied = self
            .chat
            .continue_chat(thread_id, text.to_string())
            .await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(session = %self.session_id, generation, "discarding stale chat reply");
            return Ok(SendOutcome::Superseded);
        }
        state.busy = false;

        match replied {
            Ok(reply) => {
                state.conversation.rotate_thread(reply.thread_id);
                state.conversation.push_assistant(&reply.reply);
                debug!(
                    session = %self.session_id,
                    messages = state.conversation.messages().len(),
                    "chat reply appended"
                );
                Ok(SendOutcome::Replied)
            }
            Err(e) => {
                warn!(session = %self.session_id, error = %e, "chat continue failed");
                Err(SessionError::Chat(e))
            }
        }
    }

    // ── Clear ────────────────────────────────────────────────────────────────

    /// Reset the form, drop the prediction and the conversation, and
    /// supersede anything still in flight.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.form.reset();
        state.prediction = None;
        state.conversation.clear();
        state.busy = false;
        state.phase = SessionPhase::Idle;
        info!(session = %self.session_id, generation = state.generation, "session cleared");
    }
}
