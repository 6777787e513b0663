//! Request contract: conversation turns and the plan request.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Who authored a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

impl Role {
    /// Map to the model's chat role (`agent` is the model's `assistant`)
    pub fn to_chat_role(self) -> waypoint_ai::Role {
        match self {
            Role::User => waypoint_ai::Role::User,
            Role::Agent => waypoint_ai::Role::Assistant,
        }
    }
}

/// One prior turn supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

/// Body of a planning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// The user's high-level objective
    pub goal: String,
    /// The message being sent now
    pub message: String,
    /// Prior turns, oldest first
    #[serde(default)]
    pub conversation: Vec<ConversationTurn>,
}

impl PlanRequest {
    pub fn new(goal: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            message: message.into(),
            conversation: Vec::new(),
        }
    }

    /// Attach prior conversation turns
    pub fn with_conversation(mut self, conversation: Vec<ConversationTurn>) -> Self {
        self.conversation = conversation;
        self
    }

    /// Reject blank goals and messages.
    pub fn validate(&self) -> Result<()> {
        if self.goal.trim().is_empty() {
            return Err(Error::validation("goal", "must not be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(Error::validation("message", "must not be empty"));
        }
        Ok(())
    }

    /// Most recent turn authored by the agent, if any
    pub fn last_agent_turn(&self) -> Option<&ConversationTurn> {
        self.conversation.iter().rev().find(|t| t.role == Role::Agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_defaults_to_empty() {
        let req: PlanRequest =
            serde_json::from_str(r#"{"goal": "Ship v1", "message": "hi"}"#).unwrap();
        assert!(req.conversation.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_role_rejected() {
        let err = serde_json::from_str::<PlanRequest>(
            r#"{"goal": "g", "message": "m", "conversation": [{"role": "bot", "content": "x"}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown variant"), "got: {}", err);
    }

    #[test]
    fn test_missing_goal_rejected() {
        let err = serde_json::from_str::<PlanRequest>(r#"{"message": "m"}"#).unwrap_err();
        assert!(err.to_string().contains("goal"), "got: {}", err);
    }

    #[test]
    fn test_blank_goal_rejected() {
        let err = PlanRequest::new("  \t\n", "hello").validate().unwrap_err();
        assert_eq!(err.field(), Some("goal"));
    }

    #[test]
    fn test_blank_message_rejected() {
        let err = PlanRequest::new("Ship v1", "").validate().unwrap_err();
        assert_eq!(err.field(), Some("message"));
    }

    #[test]
    fn test_last_agent_turn() {
        let req = PlanRequest::new("g", "m").with_conversation(vec![
            ConversationTurn::user("one"),
            ConversationTurn::agent("two"),
            ConversationTurn::user("three"),
        ]);
        assert_eq!(req.last_agent_turn().map(|t| t.content.as_str()), Some("two"));
        assert!(PlanRequest::new("g", "m").last_agent_turn().is_none());
    }

    #[test]
    fn test_role_maps_to_chat_role() {
        assert_eq!(Role::Agent.to_chat_role(), waypoint_ai::Role::Assistant);
        assert_eq!(Role::User.to_chat_role(), waypoint_ai::Role::User);
    }
}
