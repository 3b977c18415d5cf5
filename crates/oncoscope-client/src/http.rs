//! Blocking HTTP client for the OncoScope API, exposed through the async
//! collaborator traits by running each request on tokio's blocking pool.

use std::time::Duration;

use oncoscope_core::models::prediction::Prediction;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use ureq::Agent;
use ureq::http::Response;

use crate::backend::{BoxFuture, ChatClient, PredictionClient};
use crate::error::ClientError;
use crate::wire::{
    ChatContinueRequest, ChatContinueResponse, ChatStartRequest, ChatStartResponse, ErrorBody,
    HealthResponse, PredictRequest,
};

pub const PREDICT_PATH: &str = "/predict-structured";
pub const CHAT_START_PATH: &str = "/chat/start";
pub const CHAT_CONTINUE_PATH: &str = "/chat/continue";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL without a trailing path, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Upper bound on a whole request, connect to last byte.
    pub timeout: Duration,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Client for the prediction and chat endpoints of one backend.
#[derive(Clone)]
pub struct HttpBackend {
    agent: Agent,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &HttpBackendConfig) -> Self {
        // Non-2xx responses are read as values so the `detail` body survives.
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let agent = self.agent.clone();
        let url = self.url(HEALTH_PATH);
        run_blocking(move || {
            let mut response = agent
                .get(&url)
                .call()
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            read_json(&url, &mut response)
        })
        .await
    }

    fn post<Req, Resp>(&self, path: &str, body: Req) -> BoxFuture<'_, Result<Resp, ClientError>>
    where
        Req: Serialize + Send + 'static,
        Resp: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let url = self.url(path);
        Box::pin(run_blocking(move || {
            debug!(url = %url, "POST");
            let mut response = agent
                .post(&url)
                .send_json(&body)
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            read_json(&url, &mut response)
        }))
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, ClientError>
where
    F: FnOnce() -> Result<T, ClientError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ClientError::Runtime(e.to_string()))?
}

fn read_json<T: DeserializeOwned>(
    url: &str,
    response: &mut Response<ureq::Body>,
) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.body_mut().read_to_string().unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail_text())
            .unwrap_or(text);
        warn!(url, status = status.as_u16(), detail = %detail, "service returned an error");
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    response
        .body_mut()
        .read_json::<T>()
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

impl PredictionClient for HttpBackend {
    fn predict(&self, features: Vec<f64>) -> BoxFuture<'_, Result<Prediction, ClientError>> {
        info!(features = features.len(), "requesting prediction");
        self.post(PREDICT_PATH, PredictRequest { features })
    }
}

impl ChatClient for HttpBackend {
    fn start_chat(
        &self,
        diagnosis: String,
        confidence: f64,
    ) -> BoxFuture<'_, Result<ChatStartResponse, ClientError>> {
        info!(diagnosis = %diagnosis, confidence, "starting chat thread");
        self.post(
            CHAT_START_PATH,
            ChatStartRequest {
                diagnosis,
                confidence,
            },
        )
    }

    fn continue_chat(
        &self,
        thread_id: String,
        user_text: String,
    ) -> BoxFuture<'_, Result<ChatContinueResponse, ClientError>> {
        info!(thread_id = %thread_id, chars = user_text.chars().count(), "continuing chat thread");
        self.post(
            CHAT_CONTINUE_PATH,
            ChatContinueRequest {
                thread_id,
                user_text,
            },
        )
    }
}
