//! Sanitizer agent removing protected health information (PHI).

use crate::agents::base::{Agent, AgentCore};
use crate::errors::MedAgentResult;
use crate::models::input::TaskInput;
use crate::models::message::CompletionRequest;
use crate::models::options::{resolve_option, ConfigOption};

pub const DATA: &str = "data";

/// How removed identifiers are marked in the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedactionStyle {
    Placeholder,
    #[default]
    Categorized,
}

impl ConfigOption for RedactionStyle {
    const FIELD: &'static str = "redaction";
    const ALL: &'static [Self] = &[Self::Placeholder, Self::Categorized];

    fn label(self) -> &'static str {
        match self {
            Self::Placeholder => "Placeholder",
            Self::Categorized => "Categorized",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Placeholder => "replace every identifier with [REDACTED]",
            Self::Categorized => {
                "replace every identifier with a bracketed category label such as [NAME], [DATE], [ADDRESS], [PHONE], [MRN] or [ID]"
            }
        }
    }
}

pub struct SanitizerAgent {
    core: AgentCore,
}

impl SanitizerAgent {
    pub const NAME: &'static str = "Sanitizer";
    pub const MAX_TOKENS: u32 = 600;
    pub const TEMPERATURE: f32 = 0.1;

    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }
}

impl Agent for SanitizerAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest> {
        let style: RedactionStyle = resolve_option(self.name(), input)?;
        let data = input.require(self.name(), DATA)?;

        let system = format!(
            "You are a healthcare data privacy specialist. Remove all protected health \
             information (PHI) as defined by HIPAA: names, dates more specific than the year, \
             addresses, phone and fax numbers, emails, record and account numbers, and any \
             other unique identifier. {}. Keep all clinical content intact.",
            style.instruction(),
        );

        let user = format!(
            "Sanitize the following medical data:\n\n{}\n\n\
             Return only the sanitized text, preserving its original layout.",
            data,
        );

        Ok(CompletionRequest::new(
            system,
            user,
            Self::MAX_TOKENS,
            Self::TEMPERATURE,
        ))
    }
}
