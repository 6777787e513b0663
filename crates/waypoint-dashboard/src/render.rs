//! Plain-text rendering of the dashboard for terminal use.

use waypoint_agent::{AgentState, Role};

use crate::dashboard::{Dashboard, plan_progress};
use crate::message::ConversationMessage;

const BAR_WIDTH: usize = 20;

/// `[##########----------]  50%`
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100) as usize;
    let filled = (width * percent + 50) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

/// One conversation message, speaker first.
pub fn render_message(message: &ConversationMessage) -> String {
    match (message.role, message.meta) {
        (Role::User, _) => format!("you: {}", message.content),
        (Role::Agent, Some(meta)) => format!(
            "agent [{}, {:.0}% confident]:\n{}",
            meta.status,
            meta.confidence * 100.0,
            message.content
        ),
        (Role::Agent, None) => format!("agent:\n{}", message.content),
    }
}

/// The plan panel: status, thoughts, progress, steps, next actions, sources.
pub fn render_plan(state: &AgentState) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Status: {} ({:.0}% confidence)\n",
        state.status,
        state.thoughts.confidence * 100.0
    ));
    if !state.thoughts.summary.is_empty() {
        out.push_str(&format!("Thinking: {}\n", state.thoughts.summary));
    }
    out.push_str(&format!("Progress: {}\n", progress_bar(plan_progress(&state.plan), BAR_WIDTH)));

    if !state.plan.steps.is_empty() {
        out.push_str("Plan:\n");
        let current = state.plan.current_step as usize;
        for (i, step) in state.plan.steps.iter().enumerate() {
            let marker = if i < current {
                "x"
            } else if i == current {
                ">"
            } else {
                " "
            };
            out.push_str(&format!("  [{}] {}. {}\n", marker, i + 1, step));
        }
    }

    if !state.next_actions.is_empty() {
        out.push_str("Next:\n");
        for action in &state.next_actions {
            out.push_str(&format!("  - {}\n", action));
        }
    }

    if !state.sources.is_empty() {
        out.push_str("Sources:\n");
        for source in &state.sources {
            out.push_str(&format!("  {}\n", source));
        }
    }
    out
}

/// Goal line plus error banner, if any.
pub fn render_header(dashboard: &Dashboard) -> String {
    let mut out = format!("Goal: {}\n", dashboard.goal());
    if let Some(error) = dashboard.error() {
        out.push_str(&format!("! {}\n", error));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_agent::{AgentStatus, Plan, Thoughts};

    fn state() -> AgentState {
        AgentState {
            status: AgentStatus::Thinking,
            thoughts: Thoughts {
                summary: "Drafting".into(),
                reasoning: "r".into(),
                confidence: 0.3,
            },
            plan: Plan {
                current_step: 1,
                steps: vec!["Clarify".into(), "Split".into(), "Start".into()],
            },
            next_actions: vec!["Share deadlines".into()],
            reply: "Here is a plan".into(),
            sources: vec![],
        }
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(50, 10), "[#####-----]  50%");
        assert_eq!(progress_bar(0, 4), "[----]   0%");
        assert_eq!(progress_bar(100, 4), "[####] 100%");
        assert_eq!(progress_bar(250, 4), "[####] 100%");
    }

    #[test]
    fn test_render_plan_marks_current_step() {
        let text = render_plan(&state());
        assert!(text.contains("Status: thinking (30% confidence)"));
        assert!(text.contains("  [x] 1. Clarify"));
        assert!(text.contains("  [>] 2. Split"));
        assert!(text.contains("  [ ] 3. Start"));
        assert!(text.contains("  - Share deadlines"));
        assert!(!text.contains("Sources:"));
    }

    #[test]
    fn test_render_agent_message_with_meta() {
        let message = ConversationMessage::agent(&state());
        assert_eq!(
            render_message(&message),
            "agent [thinking, 30% confident]:\nHere is a plan"
        );
    }

    #[test]
    fn test_render_user_message() {
        let message = ConversationMessage::user("hi");
        assert_eq!(render_message(&message), "you: hi");
    }

    #[test]
    fn test_header_shows_error_banner() {
        let mut dash = Dashboard::new("Ship v1");
        assert_eq!(render_header(&dash), "Goal: Ship v1\n");
        dash.begin_send("x");
        dash.fail("offline");
        assert_eq!(render_header(&dash), "Goal: Ship v1\n! offline\n");
    }
}
