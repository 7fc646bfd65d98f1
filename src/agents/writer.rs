//! Writer agent drafting medical articles from a topic and an optional outline.

use crate::agents::base::{Agent, AgentCore};
use crate::errors::MedAgentResult;
use crate::models::input::TaskInput;
use crate::models::message::CompletionRequest;
use crate::models::options::{resolve_option, ConfigOption};

pub const TOPIC: &str = "topic";
pub const OUTLINE: &str = "outline";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArticleFormat {
    #[default]
    ResearchArticle,
    Review,
    CaseReport,
}

impl ConfigOption for ArticleFormat {
    const FIELD: &'static str = "format";
    const ALL: &'static [Self] = &[Self::ResearchArticle, Self::Review, Self::CaseReport];

    fn label(self) -> &'static str {
        match self {
            Self::ResearchArticle => "Research Article",
            Self::Review => "Review",
            Self::CaseReport => "Case Report",
        }
    }

    fn instruction(self) -> &'static str {
        match self {
            Self::ResearchArticle => {
                "a research article with Introduction, Methods, Results, Discussion and Conclusion sections"
            }
            Self::Review => {
                "a narrative review synthesizing current evidence, organized by theme, with a closing summary of open questions"
            }
            Self::CaseReport => {
                "a case report with Background, Case Presentation, Discussion and Conclusion sections"
            }
        }
    }
}

pub struct WriteArticleAgent {
    core: AgentCore,
}

impl WriteArticleAgent {
    pub const NAME: &'static str = "ArticleWriter";
    pub const MAX_TOKENS: u32 = 1000;
    pub const TEMPERATURE: f32 = 0.7;

    pub fn new(core: AgentCore) -> Self {
        Self { core }
    }
}

impl Agent for WriteArticleAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest> {
        let format: ArticleFormat = resolve_option(self.name(), input)?;
        let topic = input.require(self.name(), TOPIC)?;

        let system = format!(
            "You are an expert medical writer. Write {}.\n\
             - Base every claim on established medical knowledge\n\
             - Use formal academic tone and standard medical terminology\n\
             - Do not invent study results, statistics or citations",
            format.instruction(),
        );

        let structure = match input.text(OUTLINE) {
            Some(outline) => format!("Follow this outline:\n{}", outline),
            None => "Choose a logical structure for the topic.".to_string(),
        };

        let user = format!(
            "Topic: {}\n\n{}\n\n\
             Write the complete article in Markdown with a title and section headings.",
            topic, structure,
        );

        Ok(CompletionRequest::new(
            system,
            user,
            Self::MAX_TOKENS,
            Self::TEMPERATURE,
        ))
    }
}
