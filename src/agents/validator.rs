//! Validator agents checking generated text against its source.

use crate::agents::base::{Agent, AgentCore};
use crate::agents::verdict::{ValidationReport, CRITICAL_SENTINEL, PASS_SENTINEL};
use crate::agents::{sanitizer, summarizer, writer};
use crate::errors::MedAgentResult;
use crate::models::input::TaskInput;
use crate::models::message::CompletionRequest;

pub const SUMMARY: &str = "summary";
pub const ARTICLE: &str = "article";
pub const SANITIZED_DATA: &str = "sanitized_data";

/// What a validator checks, and which input fields carry the source and the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationTarget {
    /// A summary against the original medical text
    Summary,
    /// A refined article against its topic
    Article,
    /// Sanitized data against the original data
    Sanitization,
}

impl ValidationTarget {
    pub fn agent_name(self) -> &'static str {
        match self {
            Self::Summary => "SummaryValidator",
            Self::Article => "ArticleValidator",
            Self::Sanitization => "SanitizationValidator",
        }
    }

    /// Input field holding the reference material
    pub fn source_field(self) -> &'static str {
        match self {
            Self::Summary => summarizer::TEXT,
            Self::Article => writer::TOPIC,
            Self::Sanitization => sanitizer::DATA,
        }
    }

    /// Input field holding the text under review
    pub fn candidate_field(self) -> &'static str {
        match self {
            Self::Summary => SUMMARY,
            Self::Article => ARTICLE,
            Self::Sanitization => SANITIZED_DATA,
        }
    }

    fn persona(self) -> &'static str {
        match self {
            Self::Summary => {
                "You are a clinical documentation reviewer. Check that the summary is faithful \
                 to the original text: no omitted diagnoses, treatments or outcomes, no altered \
                 numbers, and nothing that is not supported by the original."
            }
            Self::Article => {
                "You are a peer reviewer for a medical journal. Check the article for factual \
                 accuracy, relevance to the topic, unsupported claims and unsafe medical advice."
            }
            Self::Sanitization => {
                "You are a HIPAA compliance auditor. Check that the sanitized data contains no \
                 remaining protected health information and that clinical content was preserved."
            }
        }
    }

    fn labels(self) -> (&'static str, &'static str) {
        match self {
            Self::Summary => ("Original text", "Summary"),
            Self::Article => ("Topic", "Article"),
            Self::Sanitization => ("Original data", "Sanitized data"),
        }
    }
}

/// Validator agent reviewing one kind of generated text.
///
/// The answer is free text ending in a verdict line; use [`ValidatorAgent::validate`]
/// or [`ValidationReport`] to classify it.
pub struct ValidatorAgent {
    core: AgentCore,
    target: ValidationTarget,
}

impl ValidatorAgent {
    pub const MAX_TOKENS: u32 = 500;
    pub const TEMPERATURE: f32 = 0.1;

    pub fn new(core: AgentCore, target: ValidationTarget) -> Self {
        Self { core, target }
    }

    /// Execute and classify the answer.
    pub async fn validate(&self, input: &TaskInput) -> MedAgentResult<ValidationReport> {
        let result = self.execute(input).await?;
        Ok(ValidationReport::new(self.name(), result))
    }
}

impl Agent for ValidatorAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest> {
        let source = input.require(self.name(), self.target.source_field())?;
        let candidate = input.require(self.name(), self.target.candidate_field())?;
        let (source_label, candidate_label) = self.target.labels();

        let system = format!(
            "{}\n\
             List each problem you find with a short explanation. Finish with a final line \
             that is exactly `VERDICT: {}` when the text is acceptable or `VERDICT: {}` when \
             it has a problem that must be fixed.",
            self.target.persona(),
            PASS_SENTINEL,
            CRITICAL_SENTINEL,
        );

        let user = format!(
            "{}:\n{}\n\n{}:\n{}",
            source_label, source, candidate_label, candidate,
        );

        Ok(CompletionRequest::new(
            system,
            user,
            Self::MAX_TOKENS,
            Self::TEMPERATURE,
        ))
    }
}
