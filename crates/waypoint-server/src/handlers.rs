//! Route handlers

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;
use waypoint_agent::{AgentState, PlanRequest, PlanSource};

use crate::{AppState, error::ApiError};

/// Header naming the path that produced a plan (`model` or `local`)
pub const PLAN_SOURCE_HEADER: &str = "x-plan-source";

/// `POST /api/agent`
pub async fn plan(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<([(&'static str, &'static str); 1], Json<AgentState>), ApiError> {
    let Json(request) = payload?;
    let (agent_state, source) = state.planner.plan_with_source(&request).await?;
    tracing::debug!(
        "Planned {} steps via {} for {} prior turns",
        agent_state.plan.steps.len(),
        source_label(source),
        request.conversation.len()
    );
    Ok(([(PLAN_SOURCE_HEADER, source_label(source))], Json(agent_state)))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let model_backed = state.planner.is_model_backed();
    Json(Health {
        status: "ok",
        mode: if model_backed { "model" } else { "local" },
        model: model_backed.then(|| state.planner.config().model.clone()),
    })
}

fn source_label(source: PlanSource) -> &'static str {
    match source {
        PlanSource::Model => "model",
        PlanSource::Heuristic => "local",
    }
}
