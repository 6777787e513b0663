//! Dashboard state: goal, conversation, latest plan, loading and error flags.
//!
//! Sending is a two-phase transition. [`Dashboard::begin_send`] appends the
//! user's message immediately and yields the request; the caller then either
//! [`confirm`](Dashboard::confirm)s with the response or
//! [`fail`](Dashboard::fail)s with the transport error. The user message is
//! never rolled back.

use uuid::Uuid;
use waypoint_agent::{AgentState, Plan, PlanRequest};

use crate::message::ConversationMessage;
use crate::transport::PlanTransport;

#[derive(Debug, Default)]
pub struct Dashboard {
    goal: String,
    draft: String,
    messages: Vec<ConversationMessage>,
    agent_state: Option<AgentState>,
    is_loading: bool,
    error: Option<String>,
    scroll_anchor: Option<Uuid>,
}

/// Percentage of `plan` covered by its current step, rounded and clamped
/// to `0..=100`; an empty plan is 0.
pub fn plan_progress(plan: &Plan) -> u8 {
    plan.progress()
}

impl Dashboard {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            ..Default::default()
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn set_goal(&mut self, goal: impl Into<String>) {
        self.goal = goal.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn agent_state(&self) -> Option<&AgentState> {
        self.agent_state.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Banner text of the last failed send
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the message the conversation view should be scrolled to
    pub fn scroll_anchor(&self) -> Option<Uuid> {
        self.scroll_anchor
    }

    /// Whether input should be accepted
    pub fn can_send(&self) -> bool {
        !self.is_loading
    }

    /// Plan progress in percent; 0 without a plan.
    pub fn progress(&self) -> u8 {
        self.agent_state
            .as_ref()
            .map(|s| plan_progress(&s.plan))
            .unwrap_or(0)
    }

    /// Phase one of a send.
    ///
    /// Returns `None` without touching state when the content is blank or a
    /// request is already in flight.
    pub fn begin_send(&mut self, content: &str) -> Option<PlanRequest> {
        if content.trim().is_empty() || self.is_loading {
            return None;
        }

        let conversation = self.messages.iter().map(|m| m.to_turn()).collect();
        self.append(ConversationMessage::user(content));
        self.draft.clear();
        self.error = None;
        self.is_loading = true;

        Some(PlanRequest::new(self.goal.clone(), content).with_conversation(conversation))
    }

    /// Phase two on success: replace the agent state and append the reply.
    pub fn confirm(&mut self, state: AgentState) {
        if !self.is_loading {
            tracing::warn!("Ignoring agent response with no request in flight");
            return;
        }
        self.append(ConversationMessage::agent(&state));
        self.agent_state = Some(state);
        self.is_loading = false;
    }

    /// Phase two on failure: surface the error and keep the conversation.
    pub fn fail(&mut self, error: impl std::fmt::Display) {
        if !self.is_loading {
            tracing::warn!("Ignoring failure with no request in flight: {}", error);
            return;
        }
        self.error = Some(error.to_string());
        self.is_loading = false;
    }

    /// Run both phases around one transport call.
    ///
    /// Returns `false` if the send was a no-op or failed.
    pub async fn send_message<T>(&mut self, transport: &T, content: &str) -> bool
    where
        T: PlanTransport + ?Sized,
    {
        let Some(request) = self.begin_send(content) else {
            return false;
        };

        match transport.request_plan(&request).await {
            Ok(state) => {
                self.confirm(state);
                true
            }
            Err(e) => {
                tracing::warn!("Plan request failed: {}", e);
                self.fail(e);
                false
            }
        }
    }

    /// Send whatever is in the draft
    pub async fn send_draft<T>(&mut self, transport: &T) -> bool
    where
        T: PlanTransport + ?Sized,
    {
        let draft = self.draft.clone();
        self.send_message(transport, &draft).await
    }

    fn append(&mut self, message: ConversationMessage) {
        self.scroll_anchor = Some(message.id);
        self.messages.push(message);
    }
}
