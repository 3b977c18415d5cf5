//! oncoscope-client
//!
//! Boundary to the services a diagnostic session depends on: the prediction
//! model, the supportive-chat generator, and the field schema source. The
//! session controller only sees the traits in [`backend`]; [`http`] provides
//! the implementation that talks to the OncoScope HTTP API.

pub mod backend;
pub mod error;
pub mod http;
pub mod schema_source;
pub mod wire;
