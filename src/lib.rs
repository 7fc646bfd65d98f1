//! medagents - orchestration of medical text agents
//!
//! This library coordinates calls to a remote text-completion service on behalf of
//! specialized agents (summarizer, writer, refiner, sanitizer, validators): a retry
//! engine around each call, a registry that builds and caches agents by task key, and
//! sequential pipelines chaining one agent's output into the next.

pub mod agents;
pub mod config;
pub mod errors;
pub mod generate;
pub mod logging;
pub mod manager;
pub mod models;
pub mod workflows;

// Re-export commonly used types for convenience
pub use agents::{Agent, AgentCore, ValidationReport, Verdict};
pub use config::{AgentSettings, Settings};
pub use errors::{CompletionError, MedAgentError, MedAgentResult};
pub use generate::{CompletionClient, HttpCompletionClient};
pub use manager::AgentManager;
pub use models::input::TaskInput;
pub use models::pipeline::{Pipeline, PipelineOutput, PipelineStage};
pub use models::{CompletionRequest, CompletionResult, Message};
