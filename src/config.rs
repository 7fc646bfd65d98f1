//! Runtime settings, merged from defaults, an optional TOML file and the environment.

use crate::agents::retry::{RetryPolicy, RetryStrategy};
use crate::errors::MedAgentResult;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Project-level settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "medagents.toml";
/// Prefix of environment overrides, e.g. `MEDAGENTS_MAX_RETRIES=4`
pub const ENV_PREFIX: &str = "MEDAGENTS_";
/// Fallback source for the API key
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Dotenv file consulted for the fallback key, relative to the working directory
pub const DOTENV_FILE: &str = ".env";

/// Backoff between retry attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffSettings {
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub multiplier: f64,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            max_delay_ms: 8_000,
            multiplier: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Full chat-completions URL
    pub endpoint: String,
    pub api_key: Option<String>,
    pub model: String,
    pub request_timeout_secs: u64,
    /// Retry budget: attempts beyond the first
    pub max_retries: u32,
    /// Log every attempt at info level
    pub verbose: bool,
    pub backoff: BackoffSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            request_timeout_secs: 60,
            max_retries: 2,
            verbose: true,
            backoff: BackoffSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings with priority (highest first):
    /// 1. `MEDAGENTS_*` environment variables (`__` separates nested keys)
    /// 2. the explicit `path`, or `./medagents.toml` when no path is given
    /// 3. built-in defaults
    ///
    /// `OPENAI_API_KEY` fills in the key when none of the above sets one, read from the
    /// process environment first and then from `./.env`. The `.env` file is only read,
    /// never exported into the process environment.
    pub fn load(path: Option<&Path>) -> MedAgentResult<Self> {
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));

        let mut settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)?;

        if settings.api_key.is_none() {
            settings.api_key = std::env::var(ENV_OPENAI_API_KEY)
                .ok()
                .filter(|key| !key.trim().is_empty())
                .or_else(|| dotenv_value(ENV_OPENAI_API_KEY));
        }

        Ok(settings)
    }

    /// The per-agent part of the settings.
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            retry: RetryPolicy::new(
                self.max_retries,
                RetryStrategy::ExponentialBackoff {
                    base: Duration::from_millis(self.backoff.initial_delay_ms),
                    max: Duration::from_millis(self.backoff.max_delay_ms),
                    multiplier: self.backoff.multiplier,
                },
            ),
            verbose: self.verbose,
        }
    }
}

/// Non-blank value of `key` in `./.env`, if the file exists and sets it.
fn dotenv_value(key: &str) -> Option<String> {
    dotenvy::from_path_iter(DOTENV_FILE)
        .ok()?
        .filter_map(Result::ok)
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)
        .filter(|value| !value.trim().is_empty())
}

/// Configuration every agent built by a manager shares.
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub retry: RetryPolicy,
    pub verbose: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Settings::default().agent_settings()
    }
}
