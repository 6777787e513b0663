//! waypoint-agent: planning core
//!
//! This crate owns the request/response contract of the planning endpoint:
//! request validation, the response schema, the local guidance fallback, and
//! the planner that ties them to a model provider.

pub mod conversation;
pub mod error;
pub mod heuristic;
pub mod planner;
pub mod prompt;
pub mod schema;
pub mod state;

pub use conversation::{ConversationTurn, PlanRequest, Role};
pub use error::{Error, Result};
pub use planner::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, PlanSource, Planner, PlannerConfig};
pub use schema::{SchemaError, parse_agent_state};
pub use state::{AgentState, AgentStatus, Plan, Thoughts};
