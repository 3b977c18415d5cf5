//! Scripted collaborators for driving the controller without a network.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use oncoscope_client::backend::{BoxFuture, ChatClient, PredictionClient, SchemaSource};
use oncoscope_client::error::ClientError;
use oncoscope_client::wire::{ChatContinueResponse, ChatStartResponse};
use oncoscope_core::field::FieldSchema;
use oncoscope_core::models::chat::ChatRole;
use oncoscope_core::models::prediction::Prediction;
use oncoscope_session::SessionController;
use tokio::sync::oneshot;

struct Step<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T, ClientError>,
}

/// Queue of canned responses for one endpoint. A held step waits until its
/// sender fires (or is dropped) before resolving.
pub struct Script<T> {
    steps: Mutex<VecDeque<Step<T>>>,
    calls: AtomicUsize,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl<T> Script<T> {
    pub fn push(&self, result: Result<T, ClientError>) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step { gate: None, result });
    }

    pub fn push_held(&self, result: Result<T, ClientError>) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step {
            gate: Some(gate),
            result,
        });
        release
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn next(&self) -> Result<T, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();
        let Some(step) = step else {
            return Err(ClientError::Transport("no scripted response".to_string()));
        };
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.result
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub predict: Script<Prediction>,
    pub start: Script<ChatStartResponse>,
    pub reply: Script<ChatContinueResponse>,
    pub predicted_features: Mutex<Vec<Vec<f64>>>,
    pub started_with: Mutex<Vec<(String, f64)>>,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl FakeBackend {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl PredictionClient for FakeBackend {
    fn predict(&self, features: Vec<f64>) -> BoxFuture<'_, Result<Prediction, ClientError>> {
        self.predicted_features.lock().unwrap().push(features);
        Box::pin(self.predict.next())
    }
}

impl ChatClient for FakeBackend {
    fn start_chat(
        &self,
        diagnosis: String,
        confidence: f64,
    ) -> BoxFuture<'_, Result<ChatStartResponse, ClientError>> {
        self.started_with.lock().unwrap().push((diagnosis, confidence));
        Box::pin(self.start.next())
    }

    fn continue_chat(
        &self,
        thread_id: String,
        user_text: String,
    ) -> BoxFuture<'_, Result<ChatContinueResponse, ClientError>> {
        self.sent.lock().unwrap().push((thread_id, user_text));
        Box::pin(self.reply.next())
    }
}

pub struct FailingSource;

impl SchemaSource for FailingSource {
    fn describe(&self) -> String {
        "failing".to_string()
    }

    fn load(&self) -> BoxFuture<'_, Result<FieldSchema, ClientError>> {
        Box::pin(async { Err(ClientError::Transport("schema service down".to_string())) })
    }
}

pub fn predicted(diagnosis: &str, confidence: f64) -> Result<Prediction, ClientError> {
    Ok(Prediction::new(diagnosis, confidence))
}

pub fn started(thread_id: &str, message: &str) -> Result<ChatStartResponse, ClientError> {
    Ok(ChatStartResponse {
        thread_id: thread_id.to_string(),
        message: message.to_string(),
    })
}

pub fn replied(thread_id: &str, reply: &str) -> Result<ChatContinueResponse, ClientError> {
    Ok(ChatContinueResponse {
        thread_id: thread_id.to_string(),
        reply: reply.to_string(),
    })
}

pub fn unavailable() -> ClientError {
    ClientError::Status {
        status: 503,
        detail: "model offline".to_string(),
    }
}

pub fn two_field_schema() -> FieldSchema {
    FieldSchema::from_names(["worst radius", "worst texture"]).unwrap()
}

/// Controller with a two-field schema installed and both fields filled.
pub async fn ready_controller() -> (Arc<SessionController>, Arc<FakeBackend>) {
    let backend = Arc::new(FakeBackend::default());
    let controller = Arc::new(SessionController::new(backend.clone(), backend.clone()));
    controller.set_schema(two_field_schema()).await;
    controller.set_value("worst_radius", Some(16.1)).await.unwrap();
    controller.set_value("worst_texture", Some(25.4)).await.unwrap();
    (controller, backend)
}

/// Controller that has completed a submit and holds thread `t1`.
pub async fn chatting_controller() -> (Arc<SessionController>, Arc<FakeBackend>) {
    let (controller, backend) = ready_controller().await;
    backend.predict.push(predicted("Maligno", 0.93));
    backend.start.push(started("t1", "Olá"));
    controller.submit().await.unwrap();
    (controller, backend)
}

pub async fn transcript(controller: &SessionController) -> Vec<(ChatRole, String)> {
    controller
        .snapshot()
        .await
        .messages
        .into_iter()
        .map(|m| (m.role, m.content))
        .collect()
}

/// Yield to spawned tasks until `done` holds.
pub async fn wait_for(mut done: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}
