//! oncoscope-core
//!
//! Pure domain types for a diagnostic session: field schemas, the built-in
//! cytology feature catalog, form state, and the prediction and conversation
//! models. No network or filesystem access lives here.

pub mod catalog;
pub mod error;
pub mod field;
pub mod form;
pub mod models;
pub mod schema_doc;
