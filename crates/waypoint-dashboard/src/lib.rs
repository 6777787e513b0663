//! waypoint-dashboard: the dashboard client
//!
//! Holds conversation and plan state in memory, sends each message with the
//! goal and full history to the planning endpoint, and renders the result.

pub mod dashboard;
pub mod message;
pub mod render;
pub mod transport;

pub use dashboard::{Dashboard, plan_progress};
pub use message::{ConversationMessage, MessageMeta};
pub use transport::{DEFAULT_ENDPOINT, HttpTransport, PlanTransport, TransportError};
