//! Registry of named agents, built on first use and shared afterwards.

use crate::agents::base::{Agent, AgentCore};
use crate::agents::{
    RefinerAgent, SanitizerAgent, SummarizeAgent, ValidationTarget, ValidatorAgent,
    WriteArticleAgent,
};
use crate::config::{AgentSettings, Settings};
use crate::errors::{MedAgentError, MedAgentResult};
use crate::generate::client::CompletionClient;
use crate::generate::generate::HttpCompletionClient;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

pub const SUMMARIZE: &str = "summarize";
pub const SUMMARIZE_VALIDATOR: &str = "summarize_validator";
pub const WRITE_ARTICLE: &str = "write_article";
pub const REFINER: &str = "refiner";
pub const ARTICLE_VALIDATOR: &str = "validator";
pub const SANITIZE_DATA: &str = "sanitize_data";
pub const SANITIZE_DATA_VALIDATOR: &str = "sanitize_data_validator";

/// Builds the agent registered under a key.
pub type AgentFactory =
    Box<dyn Fn(&AgentSettings, Arc<dyn CompletionClient>) -> Arc<dyn Agent> + Send + Sync>;

struct Registration {
    factory: AgentFactory,
    instance: OnceLock<Arc<dyn Agent>>,
}

/// Maps task keys to agents.
///
/// The manager is a context object: build one per process (or per test), hand a
/// reference to whatever serves requests, and drop it to release every cached agent.
/// Each key's agent is constructed the first time it is asked for, exactly once even
/// under concurrent first use, and the same instance is returned afterwards.
///
/// # Example
/// ```rust,no_run
/// use medagents::config::Settings;
/// use medagents::manager::{AgentManager, SUMMARIZE};
/// use medagents::models::input::TaskInput;
///
/// # async fn run() -> medagents::MedAgentResult<()> {
/// let manager = AgentManager::from_settings(&Settings::load(None)?)?;
/// let summarizer = manager.get_agent(SUMMARIZE)?;
/// let summary = summarizer
///     .execute(&TaskInput::new().with("text", "Patient presents with BP 140/90..."))
///     .await?;
/// println!("{}", summary.content);
/// # Ok(())
/// # }
/// ```
pub struct AgentManager {
    client: Arc<dyn CompletionClient>,
    settings: AgentSettings,
    registry: HashMap<String, Registration>,
}

impl AgentManager {
    /// A manager with no agents registered.
    pub fn new(client: Arc<dyn CompletionClient>, settings: AgentSettings) -> Self {
        Self {
            client,
            settings,
            registry: HashMap::new(),
        }
    }

    /// A manager with every built-in agent registered under its task key.
    pub fn with_default_agents(
        client: Arc<dyn CompletionClient>,
        settings: AgentSettings,
    ) -> Self {
        let mut manager = Self::new(client, settings);
        for (key, factory) in default_factories() {
            manager.insert(key.to_string(), factory);
        }
        manager
    }

    /// Default agents talking to the HTTP completion client described by `settings`.
    pub fn from_settings(settings: &Settings) -> MedAgentResult<Self> {
        let client = HttpCompletionClient::from_settings(settings)?;
        Ok(Self::with_default_agents(
            Arc::new(client),
            settings.agent_settings(),
        ))
    }

    /// Register a factory under `key`.
    ///
    /// # Returns
    /// * `Err(MedAgentError::DuplicateAgent)` if the key is taken
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F) -> MedAgentResult<()>
    where
        F: Fn(&AgentSettings, Arc<dyn CompletionClient>) -> Arc<dyn Agent> + Send + Sync + 'static,
    {
        let key = key.into();
        if self.is_registered(&key) {
            return Err(MedAgentError::DuplicateAgent(key));
        }
        self.insert(key, Box::new(factory));
        Ok(())
    }

    fn insert(&mut self, key: String, factory: AgentFactory) {
        self.registry.insert(
            key,
            Registration {
                factory,
                instance: OnceLock::new(),
            },
        );
    }

    /// The agent for `key`, constructing it on first use.
    pub fn get_agent(&self, key: &str) -> MedAgentResult<Arc<dyn Agent>> {
        let registration = self
            .registry
            .get(key)
            .ok_or_else(|| MedAgentError::UnknownAgent(key.to_string()))?;

        let agent = registration.instance.get_or_init(|| {
            debug!(key, "constructing agent");
            (registration.factory)(&self.settings, Arc::clone(&self.client))
        });
        Ok(Arc::clone(agent))
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.registry.contains_key(key)
    }

    /// Whether the agent for `key` has been constructed
    pub fn is_cached(&self, key: &str) -> bool {
        self.registry
            .get(key)
            .is_some_and(|registration| registration.instance.get().is_some())
    }

    /// Drop every cached agent; the next `get_agent` constructs afresh.
    pub fn clear_cache(&mut self) {
        for registration in self.registry.values_mut() {
            registration.instance.take();
        }
    }
}

fn factory<F>(build: F) -> AgentFactory
where
    F: Fn(&AgentSettings, Arc<dyn CompletionClient>) -> Arc<dyn Agent> + Send + Sync + 'static,
{
    Box::new(build)
}

fn validator_factory(target: ValidationTarget) -> AgentFactory {
    factory(move |settings, client| {
        Arc::new(ValidatorAgent::new(
            AgentCore::new(target.agent_name(), client, settings),
            target,
        ))
    })
}

fn default_factories() -> Vec<(&'static str, AgentFactory)> {
    vec![
        (
            SUMMARIZE,
            factory(|settings, client| {
                Arc::new(SummarizeAgent::new(AgentCore::new(
                    SummarizeAgent::NAME,
                    client,
                    settings,
                )))
            }),
        ),
        (SUMMARIZE_VALIDATOR, validator_factory(ValidationTarget::Summary)),
        (
            WRITE_ARTICLE,
            factory(|settings, client| {
                Arc::new(WriteArticleAgent::new(AgentCore::new(
                    WriteArticleAgent::NAME,
                    client,
                    settings,
                )))
            }),
        ),
        (
            REFINER,
            factory(|settings, client| {
                Arc::new(RefinerAgent::new(AgentCore::new(
                    RefinerAgent::NAME,
                    client,
                    settings,
                )))
            }),
        ),
        (ARTICLE_VALIDATOR, validator_factory(ValidationTarget::Article)),
        (
            SANITIZE_DATA,
            factory(|settings, client| {
                Arc::new(SanitizerAgent::new(AgentCore::new(
                    SanitizerAgent::NAME,
                    client,
                    settings,
                )))
            }),
        ),
        (
            SANITIZE_DATA_VALIDATOR,
            validator_factory(ValidationTarget::Sanitization),
        ),
    ]
}
