//! Task inputs handed to agents by the presentation layer.

use crate::errors::{MedAgentError, MedAgentResult};
use std::collections::BTreeMap;

/// Named string fields for one agent invocation: the payload (`text`, `topic`, ...)
/// and any option selections (`length`, `technical_level`, ...).
///
/// Values come straight from user input; agents validate them before use and ignore
/// fields they do not read.
///
/// # Example
/// ```rust
/// use medagents::models::input::TaskInput;
///
/// let input = TaskInput::new()
///     .with("text", "Patient presents with BP 140/90...")
///     .with("length", "Short");
/// assert_eq!(input.get("length"), Some("Short"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    fields: BTreeMap<String, String>,
}

impl TaskInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Raw value of a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of a field that is present and not blank
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.trim().is_empty())
    }

    /// Value of a payload field the agent cannot work without.
    pub fn require(&self, agent: &str, field: &'static str) -> MedAgentResult<&str> {
        self.text(field).ok_or_else(|| MedAgentError::MissingInput {
            agent: agent.to_string(),
            field,
        })
    }
}
