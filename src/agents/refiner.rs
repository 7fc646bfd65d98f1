//! Refiner agent improving a draft article.

use crate::agents::base::{Agent, AgentCore};
use crate::errors::MedAgentResult;
use crate::models::input::TaskInput;
use crate::models::message::CompletionRequest;
use crate::models::options::{resolve_option, ConfigOption};

pub const DRAFT: &str = "draft";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefinementFocus {
    Clarity,
    #[default]
    Academic,
    Concise,
}

impl ConfigOption for RefinementFocus {
    const FIELD: &'static str = "focus";
    const ALL: &'static [Self] = &[Self::Clarity, Self::Academic, Self::Concise];

    fn label(self) -> &'static str {
        match self {
            Self::Clarity => "Clarity",
            Self::Academic => "Academic",
            Self::Concise => "Concise",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::Clarity => "improve readability, sentence flow and transitions between sections",
            Self::Academic => {
                "raise the text to publication standard: precise terminology, formal tone and rigorous structure"
            }
            Self::Concise => "remove redundancy and tighten wording without dropping content",
        }
    }
}

pub struct RefinerAgent {
    core: AgentCore,
}

impl RefinerAgent {
    pub const NAME: &'static str = "Refiner";
    pub const MAX_TOKENS: u32 = 1200;
    pub const TEMPERATURE: f32 = 0.5;

    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }
}

impl Agent for RefinerAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest> {
        let focus: RefinementFocus = resolve_option(self.name(), input)?;
        let draft = input.require(self.name(), DRAFT)?;

        let system = format!(
            "You are a senior editor of a medical journal. Your goal: {}.\n\
             - Keep every medical fact, number and measurement unchanged\n\
             - Do not add claims that are not in the draft\n\
             - Return only the revised article",
            focus.instruction(),
        );

        let user = format!(
            "Refine the following draft article:\n\n{}\n\n\
             Preserve its Markdown headings and overall section order.",
            draft,
        );

        Ok(CompletionRequest::new(
            system,
            user,
            Self::MAX_TOKENS,
            Self::TEMPERATURE,
        ))
    }
}
