//! Transport from the dashboard to the planning endpoint

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use waypoint_agent::{AgentState, PlanRequest};

/// Failures between the dashboard and the endpoint. The display string is
/// what the error banner shows.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Endpoint unreachable or the connection failed
    #[error("Could not reach the planning service: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("The planning service rejected the request ({status}): {message}")]
    Status { status: u16, message: String },

    /// Endpoint answered with a body that is not an agent state
    #[error("The planning service sent an unreadable response: {0}")]
    Decode(String),
}

/// Something that can turn a plan request into an agent state
#[async_trait]
pub trait PlanTransport: Send + Sync {
    async fn request_plan(&self, request: &PlanRequest) -> Result<AgentState, TransportError>;
}

/// Default endpoint path on a waypoint server
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787/api/agent";

/// HTTP transport posting JSON to the endpoint
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[async_trait]
impl PlanTransport for HttpTransport {
    async fn request_plan(&self, request: &PlanRequest) -> Result<AgentState, TransportError> {
        tracing::debug!(
            "POST {} with {} prior turns",
            self.endpoint,
            request.conversation.len()
        );
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        waypoint_agent::parse_agent_state(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
