use std::future::Future;
use std::pin::Pin;

use oncoscope_core::field::FieldSchema;
use oncoscope_core::models::prediction::Prediction;

use crate::error::ClientError;
use crate::wire::{ChatContinueResponse, ChatStartResponse};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Diagnosis engine.
pub trait PredictionClient: Send + Sync {
    /// Predict a diagnosis from a feature vector in schema order.
    fn predict(&self, features: Vec<f64>) -> BoxFuture<'_, Result<Prediction, ClientError>>;
}

/// Supportive-chat generator with server-side threads.
pub trait ChatClient: Send + Sync {
    /// Open a thread anchored to a diagnosis. Returns the thread id and the
    /// greeting.
    fn start_chat(
        &self,
        diagnosis: String,
        confidence: f64,
    ) -> BoxFuture<'_, Result<ChatStartResponse, ClientError>>;

    /// Send one user message on an existing thread. The returned thread id
    /// replaces the one sent.
    fn continue_chat(
        &self,
        thread_id: String,
        user_text: String,
    ) -> BoxFuture<'_, Result<ChatContinueResponse, ClientError>>;
}

/// Where the form's field list comes from.
pub trait SchemaSource: Send + Sync {
    /// Short description for logs, e.g. a file path.
    fn describe(&self) -> String;

    fn load(&self) -> BoxFuture<'_, Result<FieldSchema, ClientError>>;
}
