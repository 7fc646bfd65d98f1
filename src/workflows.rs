//! The end-to-end medical tasks, assembled from the manager's agents.
//!
//! | task | stages |
//! |---|---|
//! | summarize | `summarize` → `validate` |
//! | article | `draft` → `refine` → `validate` |
//! | sanitize | `sanitize` → `validate` |

use crate::agents::{refiner, validator};
use crate::errors::MedAgentResult;
use crate::manager::{
    AgentManager, ARTICLE_VALIDATOR, REFINER, SANITIZE_DATA, SANITIZE_DATA_VALIDATOR, SUMMARIZE,
    SUMMARIZE_VALIDATOR, WRITE_ARTICLE,
};
use crate::models::pipeline::{Pipeline, PipelineStage};

/// Summarize `text` and check the summary against it.
///
/// Input: `text`, optional `length` and `technical_level`.
pub fn summarize_pipeline(manager: &AgentManager) -> MedAgentResult<Pipeline> {
    Ok(Pipeline::new("summarize")
        .stage(PipelineStage::new("summarize", manager.get_agent(SUMMARIZE)?))
        .stage(
            PipelineStage::new("validate", manager.get_agent(SUMMARIZE_VALIDATOR)?)
                .with_previous_as(validator::SUMMARY)
                .expect_verdict(),
        ))
}

/// Draft an article on `topic`, refine it, and review the refined version.
///
/// Input: `topic`, optional `outline`, `format` and `focus`.
pub fn article_pipeline(manager: &AgentManager) -> MedAgentResult<Pipeline> {
    Ok(Pipeline::new("article")
        .stage(PipelineStage::new("draft", manager.get_agent(WRITE_ARTICLE)?))
        .stage(
            PipelineStage::new("refine", manager.get_agent(REFINER)?)
                .with_previous_as(refiner::DRAFT),
        )
        .stage(
            PipelineStage::new("validate", manager.get_agent(ARTICLE_VALIDATOR)?)
                .with_previous_as(validator::ARTICLE)
                .expect_verdict(),
        ))
}

/// Strip PHI from `data` and audit the result.
///
/// Input: `data`, optional `redaction`.
pub fn sanitize_pipeline(manager: &AgentManager) -> MedAgentResult<Pipeline> {
    Ok(Pipeline::new("sanitize")
        .stage(PipelineStage::new("sanitize", manager.get_agent(SANITIZE_DATA)?))
        .stage(
            PipelineStage::new("validate", manager.get_agent(SANITIZE_DATA_VALIDATOR)?)
                .with_previous_as(validator::SANITIZED_DATA)
                .expect_verdict(),
        ))
}
