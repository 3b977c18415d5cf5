//! oncoscope-cli
//!
//! Terminal front-end for a diagnostic session: configuration, the
//! interactive command language, and text rendering.

pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod repl;
