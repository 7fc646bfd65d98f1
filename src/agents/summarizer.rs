//! Summarizer agent for condensing medical texts.

use crate::agents::base::{Agent, AgentCore};
use crate::errors::MedAgentResult;
use crate::models::input::TaskInput;
use crate::models::message::CompletionRequest;
use crate::models::options::{resolve_option, ConfigOption};

pub const TEXT: &str = "text";

/// Target structure and length of the summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl ConfigOption for SummaryLength {
    const FIELD: &'static str = "length";
    const ALL: &'static [Self] = &[Self::Short, Self::Medium, Self::Detailed];

    fn label(self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Medium => "Medium",
            Self::Detailed => "Detailed",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Short => "3-5 bullet points",
            Self::Medium => "2-3 concise paragraphs",
            Self::Detailed => "comprehensive summary preserving key details",
        }
    }
}

/// Audience the summary is written for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TechnicalLevel {
    PatientFriendly,
    #[default]
    Clinical,
    Research,
}

impl ConfigOption for TechnicalLevel {
    const FIELD: &'static str = "technical_level";
    const ALL: &'static [Self] = &[Self::PatientFriendly, Self::Clinical, Self::Research];

    fn label(self) -> &'static str {
        match self {
            Self::PatientFriendly => "Patient-Friendly",
            Self::Clinical => "Clinical",
            Self::Research => "Research",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::PatientFriendly => "non-medical language for general audience",
            Self::Clinical => "standard medical terminology for healthcare professionals",
            Self::Research => {
                "technical language including biochemical terms and study references"
            }
        }
    }
}

/// Summarizer agent that condenses clinical text.
///
/// Reads `text` plus the optional `length` and `technical_level` selections.
///
/// # Example
/// ```rust,ignore
/// use medagents::agents::SummarizeAgent;
/// use medagents::models::input::TaskInput;
///
/// // Assuming core is an AgentCore
/// let summarizer = SummarizeAgent::new(core);
/// let summary = summarizer
///     .execute(&TaskInput::new().with("text", note).with("length", "Short"))
///     .await?;
/// ```
pub struct SummarizeAgent {
    core: AgentCore,
}

impl SummarizeAgent {
    pub const NAME: &'static str = "Summarizer";
    /// Lower temperature for more factual responses
    pub const TEMPERATURE: f32 = 0.2;

    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }

    pub fn max_tokens(length: SummaryLength) -> u32 {
        match length {
            SummaryLength::Detailed => 400,
            _ => 300,
        }
    }
}

impl Agent for SummarizeAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest> {
        let length: SummaryLength = resolve_option(self.name(), input)?;
        let level: TechnicalLevel = resolve_option(self.name(), input)?;
        let text = input.require(self.name(), TEXT)?;

        let system = format!(
            "You are a medical summarization expert. Create summaries that are:\n\
             - Length: {}\n\
             - Technical level: {}\n\
             - Always preserve critical medical information\n\
             - Highlight diagnoses, treatments, and outcomes\n\
             - Maintain original context and meaning",
            length.instruction(),
            level.instruction(),
        );

        let user = format!(
            "Original medical text:\n{}\n\n\
             Create a summary that:\n\
             1. Extracts key clinical information\n\
             2. Structures findings logically\n\
             3. Uses {} terminology\n\
             4. Maintains {} format\n\
             5. Preserves all numerical values and measurements",
            text,
            level.label(),
            length.label().to_lowercase(),
        );

        Ok(CompletionRequest::new(
            system,
            user,
            Self::max_tokens(length),
            Self::TEMPERATURE,
        ))
    }
}
