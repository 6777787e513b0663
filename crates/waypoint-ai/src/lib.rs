//! waypoint-ai: chat-completion provider abstraction
//!
//! This crate provides the model invocation capability used by the planner:
//! request types, a provider trait, and an OpenAI-compatible implementation.

pub mod error;
pub mod providers;
pub mod types;

pub use error::{Error, Result};
pub use providers::{LlmProvider, get_api_key};
pub use types::*;
