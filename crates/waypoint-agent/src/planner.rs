//! Planner: validates a request and produces an agent state from the model
//! or from local guidance.

use std::sync::Arc;

use waypoint_ai::{CompletionOptions, LlmProvider};

use crate::{
    conversation::PlanRequest,
    error::Result,
    heuristic, prompt, schema,
    state::AgentState,
};

/// Model used when no override is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Sampling temperature for planning calls
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Planner configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Model identifier passed to the provider
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per response
    pub max_tokens: Option<u32>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

/// Which path produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Model,
    Heuristic,
}

/// Stateless planner shared across requests
pub struct Planner {
    config: PlannerConfig,
    provider: Option<Arc<dyn LlmProvider>>,
}

impl Planner {
    /// Create a planner with no model; every request gets local guidance.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// Attach a model provider
    pub fn with_provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Get the planner config
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Whether a model credential was configured
    pub fn is_model_backed(&self) -> bool {
        self.provider.is_some()
    }

    /// Produce the agent state for a request.
    ///
    /// Only request validation errors are returned; every model failure is
    /// replaced by the heuristic response.
    pub async fn plan(&self, request: &PlanRequest) -> Result<AgentState> {
        self.plan_with_source(request).await.map(|(state, _)| state)
    }

    /// Like [`Planner::plan`], also reporting which path answered.
    pub async fn plan_with_source(&self, request: &PlanRequest) -> Result<(AgentState, PlanSource)> {
        request.validate()?;

        let Some(provider) = self.provider.as_deref() else {
            tracing::debug!("No model configured, answering with local guidance");
            return Ok((heuristic::respond(request), PlanSource::Heuristic));
        };

        match self.plan_with_model(provider, request).await {
            Ok(state) => Ok((state, PlanSource::Model)),
            Err(e) => {
                if e.needs_attention() {
                    tracing::error!("Model call rejected, falling back to local guidance: {}", e);
                } else {
                    tracing::warn!("Model plan unavailable, falling back to local guidance: {}", e);
                }
                Ok((heuristic::respond(request), PlanSource::Heuristic))
            }
        }
    }

    async fn plan_with_model(
        &self,
        provider: &dyn LlmProvider,
        request: &PlanRequest,
    ) -> Result<AgentState> {
        let messages = prompt::build_messages(request);
        let mut options = CompletionOptions::json(self.config.temperature);
        options.max_tokens = self.config.max_tokens;

        tracing::debug!(
            "Requesting plan from {} with {} messages",
            self.config.model,
            messages.len()
        );
        let text = provider
            .complete(&self.config.model, &messages, &options)
            .await?;
        Ok(schema::parse_agent_state(&text)?)
    }
}
