//! The agent state returned for every planning request.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Where the agent stands on the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Thinking,
    Ready,
    Blocked,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Thinking => "thinking",
            AgentStatus::Ready => "ready",
            AgentStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The agent's self-reported reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thoughts {
    pub summary: String,
    pub reasoning: String,
    /// Self-reported, in `[0, 1]`
    pub confidence: f64,
}

/// Ordered plan with a cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// May point past the last step; consumers clamp.
    #[serde(deserialize_with = "step_index")]
    pub current_step: u32,
    pub steps: Vec<String>,
}

impl Plan {
    /// Percentage of the plan covered by `current_step`, clamped to `0..=100`.
    ///
    /// An empty plan reports 0 regardless of the cursor.
    pub fn progress(&self) -> u8 {
        if self.steps.is_empty() {
            return 0;
        }
        let total = self.steps.len() as f64;
        let done = (self.current_step as f64).min(total);
        (100.0 * done / total).round() as u8
    }
}

/// Accept whole numbers written as floats (`2.0`), which JSON Schema
/// counts as integers.
fn step_index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = f64::deserialize(deserializer)?;
    if n.fract() != 0.0 || n < 0.0 || n > u32::MAX as f64 {
        return Err(de::Error::invalid_value(
            de::Unexpected::Float(n),
            &"a non-negative whole step index",
        ));
    }
    Ok(n as u32)
}

/// Full response body of the planning endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentState {
    pub status: AgentStatus,
    pub thoughts: Thoughts,
    pub plan: Plan,
    pub next_actions: Vec<String>,
    pub reply: String,
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(current_step: u32, len: usize) -> Plan {
        Plan {
            current_step,
            steps: (0..len).map(|i| format!("step {}", i + 1)).collect(),
        }
    }

    #[test]
    fn test_progress_half() {
        assert_eq!(plan(2, 4).progress(), 50);
    }

    #[test]
    fn test_progress_empty_plan_is_zero() {
        assert_eq!(plan(0, 0).progress(), 0);
        assert_eq!(plan(7, 0).progress(), 0);
    }

    #[test]
    fn test_progress_clamps_past_end() {
        assert_eq!(plan(10, 3).progress(), 100);
    }

    #[test]
    fn test_progress_rounds() {
        assert_eq!(plan(1, 3).progress(), 33);
        assert_eq!(plan(2, 3).progress(), 67);
        assert_eq!(plan(0, 3).progress(), 0);
    }

    #[test]
    fn test_current_step_accepts_whole_floats() {
        let plan: Plan =
            serde_json::from_value(serde_json::json!({"currentStep": 2.0, "steps": []})).unwrap();
        assert_eq!(plan.current_step, 2);
        let plan: Plan =
            serde_json::from_value(serde_json::json!({"currentStep": 3, "steps": []})).unwrap();
        assert_eq!(plan.current_step, 3);
    }

    #[test]
    fn test_current_step_rejects_fractions_and_negatives() {
        for bad in [serde_json::json!(2.5), serde_json::json!(-1), serde_json::json!("2")] {
            let result =
                serde_json::from_value::<Plan>(serde_json::json!({"currentStep": bad, "steps": []}));
            assert!(result.is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let state = AgentState {
            status: AgentStatus::Ready,
            thoughts: Thoughts {
                summary: "s".into(),
                reasoning: "r".into(),
                confidence: 0.8,
            },
            plan: plan(1, 2),
            next_actions: vec!["a".into()],
            reply: "ok".into(),
            sources: vec![],
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["status"], "ready");
        assert_eq!(value["plan"]["currentStep"], 1);
        assert_eq!(value["nextActions"][0], "a");
        assert!(value.get("next_actions").is_none());
    }
}
