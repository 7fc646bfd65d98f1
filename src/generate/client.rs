//! The seam between agents and the completion service.

use crate::errors::CompletionError;
use crate::models::message::{CompletionRequest, CompletionResult};
use async_trait::async_trait;

/// A remote text-completion service.
///
/// Implementations perform exactly one call per `complete` and classify failures into
/// [`CompletionError`]; retrying is the caller's business. Any request timeout is
/// enforced here, not by the agents.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError>;

    /// Model identifier, for logging
    fn model_name(&self) -> &str;
}
