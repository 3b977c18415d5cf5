use oncoscope_client::error::ClientError;
use oncoscope_core::error::ValidationError;
use thiserror::Error;

/// Failures surfaced to the front-end. None of them leave the controller
/// unusable; each maps to one notification.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not load the field schema: {0}")]
    SchemaLoad(#[source] ClientError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("prediction failed: {0}")]
    Prediction(#[source] ClientError),

    #[error("chat failed: {0}")]
    Chat(#[source] ClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaLoad,
    Validation,
    Prediction,
    Chat,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::SchemaLoad(_) => ErrorKind::SchemaLoad,
            SessionError::Validation(_) => ErrorKind::Validation,
            SessionError::Prediction(_) => ErrorKind::Prediction,
            SessionError::Chat(_) => ErrorKind::Chat,
        }
    }
}
