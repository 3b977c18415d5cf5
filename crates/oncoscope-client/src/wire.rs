//! Request and response bodies of the OncoScope HTTP API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Feature values in schema order.
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStartRequest {
    pub diagnosis: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatStartResponse {
    pub thread_id: String,
    /// First assistant message of the thread.
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatContinueRequest {
    pub thread_id: String,
    pub user_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContinueResponse {
    /// Usually the request's id, but the service may rotate it.
    pub thread_id: String,
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body returned by the API on non-2xx responses.
///
/// `detail` is a string for application errors and a list of objects for
/// request validation failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: serde_json::Value,
}

impl ErrorBody {
    pub fn detail_text(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
