//! Enumerated configuration options for agent variants.
//!
//! Each option is a closed set of labels the presentation layer may send, and each
//! label maps to the instruction fragment it contributes to the conversation.

use crate::errors::{MedAgentError, MedAgentResult};
use crate::models::input::TaskInput;

/// A closed set of choices for one named option of an agent.
pub trait ConfigOption: Copy + Default + 'static {
    /// Input field carrying the selection
    const FIELD: &'static str;
    /// Every accepted choice
    const ALL: &'static [Self];

    /// The exact label accepted from callers
    fn label(self) -> &'static str;

    /// Instruction fragment this choice contributes to the prompt
    fn instruction(self) -> &'static str;
}

/// Resolve an option from the input: the default when the field is absent, a
/// [`MedAgentError::Configuration`] when the value matches no label exactly.
pub fn resolve_option<T: ConfigOption>(agent: &str, input: &TaskInput) -> MedAgentResult<T> {
    let Some(raw) = input.get(T::FIELD) else {
        return Ok(T::default());
    };

    T::ALL
        .iter()
        .copied()
        .find(|choice| choice.label() == raw)
        .ok_or_else(|| MedAgentError::Configuration {
            agent: agent.to_string(),
            option: T::FIELD,
            value: raw.to_string(),
            allowed: T::ALL.iter().map(|choice| choice.label()).collect(),
        })
}
