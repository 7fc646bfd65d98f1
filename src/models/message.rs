//! Conversation and completion payloads exchanged with the completion service.

use serde::{Deserialize, Serialize};

/// Author of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// Represents a message in a conversation.
///
/// # Example
/// ```rust
/// use medagents::models::message::{Message, Role};
///
/// let message = Message::user("Summarize the discharge note.");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single call to the completion service: a system + user conversation and the
/// generation parameters the agent variant fixes for its task.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionRequest {
    /// Build a request whose conversation is the system message followed by the user message.
    pub fn new(
        system: impl Into<String>,
        user: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            messages: vec![Message::system(system), Message::user(user)],
            max_tokens,
            temperature,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Text of the system message.
    pub fn system_prompt(&self) -> &str {
        self.content_of(Role::System)
    }

    /// Text of the user message.
    pub fn user_prompt(&self) -> &str {
        self.content_of(Role::User)
    }

    fn content_of(&self, role: Role) -> &str {
        self.messages
            .iter()
            .find(|message| message.role == role)
            .map(|message| message.content.as_str())
            .unwrap_or_default()
    }
}

/// Token accounting reported by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Successful output of a completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResult {
    /// Generated text, never empty once it reaches an agent's caller
    pub content: String,
    /// Token usage, when the service reports it
    pub usage: Option<Usage>,
    /// Model that produced the completion, when the service reports it
    pub model: Option<String>,
}

impl CompletionResult {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
            model: None,
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}
