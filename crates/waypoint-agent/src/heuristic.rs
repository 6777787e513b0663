//! Local guidance: a deterministic plan used when no model answer is usable.

use crate::conversation::PlanRequest;
use crate::state::{AgentState, AgentStatus, Plan, Thoughts};

/// Confidence reported for heuristic plans
pub const HEURISTIC_CONFIDENCE: f64 = 0.3;

/// Longest recap of the previous agent message, in characters
const RECAP_MAX_CHARS: usize = 160;

/// Build the heuristic response for a request.
///
/// Depends only on the goal and the supplied conversation; the current
/// message does not influence the output.
pub fn respond(request: &PlanRequest) -> AgentState {
    let goal = single_line(&request.goal);
    let goal = goal.as_str();
    let steps = plan_steps(goal);
    let next_actions = next_actions(goal);

    let mut reply = String::new();
    if let Some(turn) = request.last_agent_turn() {
        let recap = recap(&turn.content);
        if !recap.is_empty() {
            reply.push_str(&format!("Picking up from my last note: \"{}\"\n\n", recap));
        }
    }
    reply.push_str(&format!("Here is a starter plan for \"{}\":\n", goal));
    for (i, step) in steps.iter().enumerate() {
        reply.push_str(&format!("{}. {}\n", i + 1, step));
    }
    reply.push_str(
        "\nI'm working in local guidance mode right now, so this is a general template \
         rather than model-backed advice.",
    );

    AgentState {
        status: AgentStatus::Thinking,
        thoughts: Thoughts {
            summary: format!("Drafting a starter plan for \"{}\".", goal),
            reasoning: "No model-backed reasoning is available, so the plan follows a \
                        general template: clarify the outcome, break it into milestones, \
                        then start on the first one."
                .to_string(),
            confidence: HEURISTIC_CONFIDENCE,
        },
        plan: Plan {
            current_step: 1,
            steps,
        },
        next_actions,
        reply,
        sources: Vec::new(),
    }
}

fn plan_steps(goal: &str) -> Vec<String> {
    vec![
        format!("Clarify what success looks like for \"{}\" and note any constraints.", goal),
        format!("Break \"{}\" into milestones and pick the first concrete deliverable.", goal),
        "Work on the first milestone, then review progress and adjust the plan.".to_string(),
    ]
}

fn next_actions(goal: &str) -> Vec<String> {
    vec![
        format!("Share deadlines, budget, or resources available for \"{}\".", goal),
        format!("Tell me which part of \"{}\" you want to tackle first.", goal),
    ]
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse a prior message to one line, truncated on a char boundary.
fn recap(content: &str) -> String {
    let line = single_line(content);
    let mut chars = line.chars();
    let truncated: String = chars.by_ref().take(RECAP_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
