//! HTTP completion client for OpenAI-compatible chat-completions endpoints.
//!
//! One `complete` is one POST. HTTP outcomes are mapped onto [`CompletionError`] so the
//! retry engine can tell transient failures from permanent ones.

use crate::config::Settings;
use crate::errors::{CompletionError, MedAgentError, MedAgentResult};
use crate::generate::client::CompletionClient;
use crate::models::message::{CompletionRequest, CompletionResult, Message, Usage};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct ChatCompletion<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct APIResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Completion client backed by `reqwest`.
///
/// # Example
/// ```rust,no_run
/// use medagents::generate::HttpCompletionClient;
/// use std::time::Duration;
///
/// let client = HttpCompletionClient::new(
///     "https://api.openai.com/v1/chat/completions",
///     "sk-...",
///     "gpt-4o-mini",
///     Duration::from_secs(60),
/// )
/// .unwrap();
/// ```
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl HttpCompletionClient {
    /// Build a client for `endpoint` (the full chat-completions URL).
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint URL
    /// * `api_key` - Bearer token sent with every request
    /// * `model` - The model to request
    /// * `timeout` - Per-request timeout, covering connect and body read
    pub fn new(
        endpoint: impl Into<String>,
        api_key: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> MedAgentResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MedAgentError::MissingApiKey("api_key".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| MedAgentError::Client(format!("invalid API key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| MedAgentError::Client(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    /// Build a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> MedAgentResult<Self> {
        let api_key = settings.api_key.as_deref().ok_or_else(|| {
            MedAgentError::MissingApiKey("MEDAGENTS_API_KEY or OPENAI_API_KEY".to_string())
        })?;
        Self::new(
            settings.endpoint.clone(),
            api_key,
            settings.model.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, CompletionError> {
        let body = ChatCompletion {
            model: &self.model,
            messages: request.messages(),
            temperature: request.temperature(),
            max_tokens: request.max_tokens(),
        };

        debug!(
            model = %self.model,
            max_tokens = request.max_tokens(),
            temperature = request.temperature(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(classify_status(status, retry_after.as_deref(), text));
        }

        parse_completion(&text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Map a non-success HTTP status onto the completion error taxonomy.
pub fn classify_status(
    status: StatusCode,
    retry_after: Option<&str>,
    body: String,
) -> CompletionError {
    match status.as_u16() {
        429 => CompletionError::RateLimited {
            retry_after: retry_after
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(Duration::from_secs),
        },
        408 => CompletionError::Network(format!("request timeout: {}", body)),
        code @ 500..=599 => CompletionError::ServerError {
            status: code,
            message: body,
        },
        code => CompletionError::InvalidRequest {
            status: code,
            message: body,
        },
    }
}

fn parse_completion(body: &str) -> Result<CompletionResult, CompletionError> {
    let res: APIResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    let choice = res
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".to_string()))?;

    let content = choice.message.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(CompletionError::EmptyCompletion);
    }

    let mut result = CompletionResult::new(content);
    if let Some(usage) = res.usage {
        result = result.with_usage(usage);
    }
    if let Some(model) = res.model {
        result = result.with_model(model);
    }
    Ok(result)
}
