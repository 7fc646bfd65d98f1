//! The agent abstraction shared by every variant.

use crate::agents::retry::RetryPolicy;
use crate::config::AgentSettings;
use crate::errors::MedAgentResult;
use crate::generate::client::CompletionClient;
use crate::models::input::TaskInput;
use crate::models::message::{CompletionRequest, CompletionResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Identity, retry budget and completion access of one agent.
///
/// Immutable once built; agents hold one and delegate the network call to it.
#[derive(Clone)]
pub struct AgentCore {
    name: String,
    client: Arc<dyn CompletionClient>,
    retry: RetryPolicy,
    verbose: bool,
}

impl AgentCore {
    pub fn new(
        name: impl Into<String>,
        client: Arc<dyn CompletionClient>,
        settings: &AgentSettings,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            retry: settings.retry.clone(),
            verbose: settings.verbose,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_retries(&self) -> u32 {
        self.retry.max_retries()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Send `request` through the retry engine.
    pub async fn complete(&self, request: &CompletionRequest) -> MedAgentResult<CompletionResult> {
        self.retry
            .run(&self.name, self.verbose, self.client.as_ref(), request)
            .await
    }
}

/// Trait implemented by every medical text agent.
///
/// Variants only decide how a [`TaskInput`] becomes a conversation; `execute` then
/// validates, builds and sends it. Nothing reaches the completion service when
/// `prepare` fails.
///
/// # Example
/// ```rust
/// use medagents::agents::{Agent, AgentCore};
/// use medagents::errors::MedAgentResult;
/// use medagents::models::input::TaskInput;
/// use medagents::models::message::CompletionRequest;
///
/// struct EchoAgent {
///     core: AgentCore,
/// }
///
/// impl Agent for EchoAgent {
///     fn core(&self) -> &AgentCore {
///         &self.core
///     }
///
///     fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest> {
///         let text = input.require(self.name(), "text")?;
///         Ok(CompletionRequest::new("Repeat the user text.", text, 100, 0.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Agent: Send + Sync {
    fn core(&self) -> &AgentCore;

    /// Validate `input` and build the conversation for it.
    fn prepare(&self, input: &TaskInput) -> MedAgentResult<CompletionRequest>;

    fn name(&self) -> &str {
        self.core().name()
    }

    async fn execute(&self, input: &TaskInput) -> MedAgentResult<CompletionResult> {
        let request = self.prepare(input)?;
        self.core().complete(&request).await
    }
}
