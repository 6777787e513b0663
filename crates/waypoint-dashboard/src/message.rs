//! Conversation messages held by the dashboard.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use waypoint_agent::{AgentState, AgentStatus, ConversationTurn, Role};

/// Status shown next to an agent message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageMeta {
    pub status: AgentStatus,
    pub confidence: f64,
}

/// One entry in the conversation view. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub meta: Option<MessageMeta>,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    /// A message typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
            meta: None,
            created_at: Utc::now(),
        }
    }

    /// The agent's reply from a response
    pub fn agent(state: &AgentState) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Agent,
            content: state.reply.clone(),
            meta: Some(MessageMeta {
                status: state.status,
                confidence: state.thoughts.confidence,
            }),
            created_at: Utc::now(),
        }
    }

    /// Wire form sent back as conversation history
    pub fn to_turn(&self) -> ConversationTurn {
        ConversationTurn {
            role: self.role,
            content: self.content.clone(),
        }
    }
}
