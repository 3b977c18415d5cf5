//! oncoscope-session
//!
//! The diagnostic session controller. Owns the form, the prediction result,
//! and the conversation, and sequences the predict → chat start → chat
//! continue calls against the collaborators in `oncoscope-client`.
//!
//! Every pipeline is tagged with the session generation it was issued under.
//! `clear()` and each new submission advance the generation, and a response
//! that comes back for an older generation is dropped without touching state.

pub mod controller;
pub mod error;
pub mod state;

pub use controller::SessionController;
