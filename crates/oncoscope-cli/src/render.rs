//! Plain-text rendering of session state for the terminal.

use std::fmt::Write;

use jiff::tz::TimeZone;
use oncoscope_core::catalog;
use oncoscope_core::form::FormState;
use oncoscope_core::models::chat::{ChatMessage, ChatRole};
use oncoscope_core::models::prediction::Prediction;
use oncoscope_session::error::{ErrorKind, SessionError};
use oncoscope_session::state::{SessionPhase, SessionSnapshot};

pub fn fields(form: &FormState) -> String {
    if form.schema().is_none() {
        return "schema not loaded yet".to_string();
    }

    let width = form.entries().map(|(f, _)| f.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    let mut group = None;
    for (field, value) in form.entries() {
        let field_group = catalog::lookup(&field.key).map(|entry| entry.group);
        if field_group.is_some() && field_group != group {
            if let Some(g) = field_group {
                let _ = writeln!(out, "{}", g.title());
            }
            group = field_group;
        }

        let shown = match value {
            Some(v) => v.to_string(),
            None => "-".to_string(),
        };
        let hint = field
            .hint
            .as_deref()
            .map(|h| format!("  (ex: {h})"))
            .unwrap_or_default();
        let _ = writeln!(out, "  {:<width$}  {:>10}  {}{hint}", field.key, shown, field.label);
    }
    out.trim_end().to_string()
}

pub fn prediction(prediction: &Prediction) -> String {
    format!(
        "diagnosis: {} ({:.1}% confidence)",
        prediction.diagnosis,
        prediction.confidence * 100.0
    )
}

pub fn message(message: &ChatMessage) -> String {
    let time = message
        .sent_at
        .to_zoned(TimeZone::system())
        .strftime("%H:%M");
    let who = match message.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "assistant",
    };
    format!("[{time}] {who}: {}", message.content)
}

pub fn history(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return "no conversation yet".to_string();
    }
    messages.iter().map(message).collect::<Vec<_>>().join("\n")
}

pub fn status(snapshot: &SessionSnapshot) -> String {
    let phase = match snapshot.phase {
        SessionPhase::Idle => "idle",
        SessionPhase::Submitting => "submitting",
        SessionPhase::Predicted => "predicted",
        SessionPhase::ChatReady => "chat ready",
    };
    let mut out = format!(
        "session {}\nphase: {phase}{}\nschema: {}\nready to submit: {}",
        snapshot.session_id,
        if snapshot.busy { " (waiting on the backend)" } else { "" },
        if snapshot.schema_loaded { "loaded" } else { "not loaded" },
        if snapshot.can_submit { "yes" } else { "no" },
    );
    if let Some(p) = &snapshot.prediction {
        let _ = write!(out, "\n{}", prediction(p));
    }
    if let Some(thread) = &snapshot.thread_id {
        let _ = write!(out, "\nthread: {thread} ({} messages)", snapshot.messages.len());
    }
    out
}

/// One notification line per error kind.
pub fn error(err: &SessionError) -> String {
    let tag = match err.kind() {
        ErrorKind::SchemaLoad => "schema",
        ErrorKind::Validation => "invalid input",
        ErrorKind::Prediction => "prediction failed",
        ErrorKind::Chat => "chat unavailable",
    };
    let detail = match err {
        SessionError::Validation(inner) => inner.to_string(),
        SessionError::SchemaLoad(inner)
        | SessionError::Prediction(inner)
        | SessionError::Chat(inner) => inner.to_string(),
    };
    format!("[{tag}] {detail}")
}
