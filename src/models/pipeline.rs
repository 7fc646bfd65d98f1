//! Sequential pipelines of agents.
//!
//! A pipeline is an ordered list of stages. Each stage runs one agent on the
//! pipeline's initial input plus, optionally, the content the previous stage
//! produced. Stages run strictly one after another and the first failure stops the
//! pipeline.

use crate::agents::base::Agent;
use crate::agents::verdict::{ValidationReport, Verdict};
use crate::errors::{MedAgentError, MedAgentResult};
use crate::models::input::TaskInput;
use crate::models::message::CompletionResult;
use std::sync::Arc;
use tracing::{error, info};

/// One step of a [`Pipeline`].
pub struct PipelineStage {
    label: String,
    agent: Arc<dyn Agent>,
    previous_as: Option<&'static str>,
    expects_verdict: bool,
}

impl PipelineStage {
    /// A stage named `label` running `agent`.
    pub fn new(label: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        Self {
            label: label.into(),
            agent,
            previous_as: None,
            expects_verdict: false,
        }
    }

    /// Pass the previous stage's content to this stage as input field `field`.
    pub fn with_previous_as(mut self, field: &'static str) -> Self {
        self.previous_as = Some(field);
        self
    }

    /// Read a [`Verdict`] from this stage's content; an ambiguous one fails the stage.
    pub fn expect_verdict(mut self) -> Self {
        self.expects_verdict = true;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Result of one completed stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    pub stage: String,
    pub agent: String,
    pub result: CompletionResult,
    pub verdict: Option<Verdict>,
}

/// Results of a pipeline run, in stage order.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub stages: Vec<StageOutput>,
}

impl PipelineOutput {
    /// Output of the stage labelled `label`
    pub fn stage(&self, label: &str) -> Option<&StageOutput> {
        self.stages.iter().find(|output| output.stage == label)
    }

    /// Verdict of the last validating stage
    pub fn verdict(&self) -> Option<Verdict> {
        self.stages.iter().rev().find_map(|output| output.verdict)
    }

    /// Content of the last stage that did not validate
    pub fn final_content(&self) -> Option<&str> {
        self.stages
            .iter()
            .rev()
            .find(|output| output.verdict.is_none())
            .map(|output| output.result.content.as_str())
    }
}

/// An ordered chain of agent invocations.
///
/// # Example
/// ```rust,ignore
/// use medagents::models::pipeline::{Pipeline, PipelineStage};
///
/// // Assuming writer, refiner and validator are Arc<dyn Agent>
/// let pipeline = Pipeline::new("article")
///     .stage(PipelineStage::new("draft", writer))
///     .stage(PipelineStage::new("refine", refiner).with_previous_as("draft"))
///     .stage(PipelineStage::new("validate", validator).with_previous_as("article").expect_verdict());
///
/// let output = pipeline.run(&TaskInput::new().with("topic", "Statins in elderly patients")).await?;
/// ```
pub struct Pipeline {
    name: String,
    stages: Vec<PipelineStage>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    /// Append a stage
    pub fn stage(mut self, stage: PipelineStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stage labels, in execution order
    pub fn stage_labels(&self) -> Vec<&str> {
        self.stages.iter().map(PipelineStage::label).collect()
    }

    /// Run every stage in order, starting from `input`.
    ///
    /// # Returns
    /// * `Ok(PipelineOutput)` - every stage succeeded
    /// * `Err(MedAgentError::Stage)` - the first failing stage, naming it; later stages
    ///   were not run
    pub async fn run(&self, input: &TaskInput) -> MedAgentResult<PipelineOutput> {
        let mut outputs: Vec<StageOutput> = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let mut stage_input = input.clone();
            if let (Some(field), Some(previous)) = (stage.previous_as, outputs.last()) {
                stage_input.insert(field, previous.result.content.clone());
            }

            info!(
                pipeline = %self.name,
                stage = %stage.label,
                agent = stage.agent.name(),
                "running pipeline stage"
            );

            let output = self
                .run_stage(stage, &stage_input)
                .await
                .map_err(|source| {
                    error!(
                        pipeline = %self.name,
                        stage = %stage.label,
                        agent = stage.agent.name(),
                        error = %source,
                        "pipeline stage failed"
                    );
                    MedAgentError::Stage {
                        pipeline: self.name.clone(),
                        stage: stage.label.clone(),
                        source: Box::new(source),
                    }
                })?;

            outputs.push(output);
        }

        Ok(PipelineOutput { stages: outputs })
    }

    async fn run_stage(
        &self,
        stage: &PipelineStage,
        input: &TaskInput,
    ) -> MedAgentResult<StageOutput> {
        let result = stage.agent.execute(input).await?;

        let verdict = if stage.expects_verdict {
            let report = ValidationReport::new(stage.agent.name(), result.clone()).decisive()?;
            Some(report.verdict)
        } else {
            None
        };

        Ok(StageOutput {
            stage: stage.label.clone(),
            agent: stage.agent.name().to_string(),
            result,
            verdict,
        })
    }
}
