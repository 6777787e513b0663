//! System instruction and message assembly for model-backed planning.

use waypoint_ai::ChatMessage;

use crate::conversation::PlanRequest;

/// Fixed system instruction describing the required output.
pub const SYSTEM_PROMPT: &str = r#"You are a mission-planning agent embedded in a dashboard. The user works toward a single goal and chats with you about it.

Respond with ONE JSON object and nothing else. It must have exactly this shape:
{
  "status": "thinking" | "ready" | "blocked",
  "thoughts": {
    "summary": string,
    "reasoning": string,
    "confidence": number between 0 and 1
  },
  "plan": {
    "currentStep": integer >= 0,
    "steps": [string, ...]
  },
  "nextActions": [string, ...],
  "reply": string,
  "sources": [string, ...]
}

Rules:
- "reply" is what the user reads in the chat. Answer their latest message directly and keep it concise.
- "plan.steps" is the full ordered plan toward the goal, 3 to 7 short imperative steps. Keep steps stable across turns unless the user changes direction.
- "plan.currentStep" counts the steps already completed.
- "nextActions" lists 1 to 3 concrete things the user can do or tell you next.
- "status" is "blocked" when you need information from the user to continue, "ready" when the plan is actionable, otherwise "thinking".
- "thoughts.confidence" is your honest confidence that the plan will reach the goal.
- "sources" contains URLs you relied on; use an empty array when there are none. Never invent URLs.
- Do not wrap the JSON in markdown fences."#;

/// Build the chat messages for a request: system instruction, prior
/// conversation, then a final user turn carrying goal and message as JSON.
pub fn build_messages(request: &PlanRequest) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(request.conversation.len() + 2);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));

    for turn in &request.conversation {
        messages.push(ChatMessage {
            role: turn.role.to_chat_role(),
            content: turn.content.clone(),
        });
    }

    let payload = serde_json::json!({
        "goal": request.goal,
        "message": request.message,
    });
    messages.push(ChatMessage::user(payload.to_string()));
    messages
}
