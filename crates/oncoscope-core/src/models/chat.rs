use serde::{Deserialize, Serialize};

/// Longest user message the chat service accepts, in characters.
pub const MAX_USER_TEXT_CHARS: usize = 1000;

/// Assistant text recorded when a reply comes back empty.
pub const DEFAULT_REPLY: &str = "Desculpe, não consegui responder agora.";

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: jiff::Timestamp,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::now(ChatRole::User, content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::now(ChatRole::Assistant, content.into())
    }

    fn now(role: ChatRole, content: String) -> Self {
        Self {
            role,
            content,
            sent_at: jiff::Timestamp::now(),
        }
    }
}

/// Conversation anchored to a server-side thread.
///
/// Messages are append-only. The thread id is absent until a chat has been
/// started, and the most recently received id always wins.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Conversation {
    thread_id: Option<String>,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_started(&self) -> bool {
        self.thread_id.is_some()
    }

    /// Record a freshly started thread and its greeting. A blank greeting
    /// adds no message.
    pub fn start(&mut self, thread_id: String, greeting: &str) {
        self.thread_id = Some(thread_id);
        let greeting = greeting.trim();
        if !greeting.is_empty() {
            self.messages.push(ChatMessage::assistant(greeting));
        }
    }

    /// Adopt the id the service returned. A blank id keeps the current one.
    pub fn rotate_thread(&mut self, thread_id: String) {
        if !thread_id.trim().is_empty() {
            self.thread_id = Some(thread_id);
        }
    }

    pub fn push_user(&mut self, text: &str) {
        self.messages.push(ChatMessage::user(text));
    }

    /// Append an assistant message, substituting [`DEFAULT_REPLY`] for blank text.
    pub fn push_assistant(&mut self, text: &str) {
        let text = text.trim();
        let content = if text.is_empty() { DEFAULT_REPLY } else { text };
        self.messages.push(ChatMessage::assistant(content));
    }

    /// Drop the thread id and every message.
    pub fn clear(&mut self) {
        self.thread_id = None;
        self.messages.clear();
    }
}
