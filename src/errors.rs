//! Error handling module for the medagents library.
//!
//! Two layers: [`CompletionError`] classifies what went wrong on a single call to the
//! completion service, and [`MedAgentError`] is what callers of agents, the manager and
//! pipelines see.

use std::time::Duration;
use thiserror::Error;

/// Failure of a single completion call, as reported by a [`CompletionClient`].
///
/// [`CompletionClient`]: crate::generate::client::CompletionClient
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The service rejected the call because of rate limiting
    #[error("completion service rate limit exceeded")]
    RateLimited { retry_after: Option<Duration> },
    /// The service failed on its side (5xx)
    #[error("completion service error (status {status}): {message}")]
    ServerError { status: u16, message: String },
    /// The call never produced a response (connect, timeout, reset, body read)
    #[error("network error: {0}")]
    Network(String),
    /// The service refused the request as malformed or unauthorized
    #[error("invalid completion request (status {status}): {message}")]
    InvalidRequest { status: u16, message: String },
    /// The service answered but the body could not be understood
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
    /// The service answered successfully with no text
    #[error("completion service returned empty content")]
    EmptyCompletion,
}

impl CompletionError {
    /// Whether a later attempt of the same call may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            CompletionError::RateLimited { .. }
            | CompletionError::ServerError { .. }
            | CompletionError::Network(_)
            | CompletionError::EmptyCompletion => true,
            CompletionError::InvalidRequest { .. } | CompletionError::MalformedResponse(_) => {
                false
            }
        }
    }

    /// Delay requested by the service before the next attempt, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            CompletionError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Main error type for the medagents library
#[derive(Debug, Error)]
pub enum MedAgentError {
    /// An option value is not in the agent's enumerated table
    #[error("agent '{agent}': unrecognized {option} '{value}' (expected one of: {})", .allowed.join(", "))]
    Configuration {
        agent: String,
        option: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    /// A required payload field is absent or blank
    #[error("agent '{agent}': missing required input '{field}'")]
    MissingInput { agent: String, field: &'static str },

    /// Every attempt failed transiently
    #[error("agent '{agent}': completion failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        agent: String,
        attempts: u32,
        #[source]
        last: CompletionError,
    },

    /// A non-transient completion failure, surfaced without retrying
    #[error("agent '{agent}': {source}")]
    Completion {
        agent: String,
        #[source]
        source: CompletionError,
    },

    #[error("unknown agent '{0}'")]
    UnknownAgent(String),

    #[error("agent '{0}' is already registered")]
    DuplicateAgent(String),

    /// Validator output carried neither a pass nor a critical signal
    #[error("agent '{agent}': validation result is ambiguous")]
    ValidationAmbiguous { agent: String },

    /// A pipeline stage failed; the remaining stages were not run
    #[error("pipeline '{pipeline}' failed at stage '{stage}': {source}")]
    Stage {
        pipeline: String,
        stage: String,
        #[source]
        source: Box<MedAgentError>,
    },

    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// The HTTP client could not be built
    #[error("completion client error: {0}")]
    Client(String),

    #[error("settings error: {0}")]
    Settings(#[from] Box<figment::Error>),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl MedAgentError {
    /// Name of the failed pipeline stage, if this error came out of a pipeline.
    pub fn stage(&self) -> Option<&str> {
        match self {
            MedAgentError::Stage { stage, .. } => Some(stage),
            _ => None,
        }
    }

    /// The error with any pipeline stage annotation peeled off.
    pub fn root(&self) -> &MedAgentError {
        match self {
            MedAgentError::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// The completion failure behind this error, if there is one.
    pub fn completion_cause(&self) -> Option<&CompletionError> {
        match self.root() {
            MedAgentError::RetriesExhausted { last, .. } => Some(last),
            MedAgentError::Completion { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for medagents operations
pub type MedAgentResult<T> = Result<T, MedAgentError>;
