use std::path::PathBuf;

use oncoscope_core::error::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service responded {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("background task failed: {0}")]
    Runtime(String),
}
