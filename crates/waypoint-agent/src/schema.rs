//! Validating parser for model output.
//!
//! Model text is checked structurally against a JSON Schema before it is
//! deserialized, so malformed or adversarial output never reaches callers as
//! an [`AgentState`].

use std::sync::LazyLock;

use serde_json::Value;
use thiserror::Error;

use crate::state::AgentState;

/// Why a model output was rejected
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("model returned empty output")]
    Empty,

    #[error("model output is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),

    #[error("model output failed schema validation:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),

    #[error("model output has the wrong shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("response schema failed to compile: {0}")]
    Compile(String),
}

/// JSON Schema every planning response must satisfy.
pub fn response_schema() -> Value {
    let string_array = serde_json::json!({
        "type": "array",
        "items": { "type": "string" }
    });
    serde_json::json!({
        "type": "object",
        "required": ["status", "thoughts", "plan", "nextActions", "reply", "sources"],
        "properties": {
            "status": { "type": "string", "enum": ["thinking", "ready", "blocked"] },
            "thoughts": {
                "type": "object",
                "required": ["summary", "reasoning", "confidence"],
                "properties": {
                    "summary": { "type": "string" },
                    "reasoning": { "type": "string" },
                    "confidence": { "type": "number", "minimum": 0, "maximum": 1 }
                }
            },
            "plan": {
                "type": "object",
                "required": ["currentStep", "steps"],
                "properties": {
                    "currentStep": { "type": "integer", "minimum": 0, "maximum": u32::MAX },
                    "steps": string_array.clone()
                }
            },
            "nextActions": string_array.clone(),
            "reply": { "type": "string" },
            "sources": string_array
        }
    })
}

static VALIDATOR: LazyLock<std::result::Result<jsonschema::Validator, String>> =
    LazyLock::new(|| jsonschema::validator_for(&response_schema()).map_err(|e| e.to_string()));

/// Parse raw model text into an [`AgentState`].
pub fn parse_agent_state(text: &str) -> Result<AgentState, SchemaError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SchemaError::Empty);
    }

    let value: Value = serde_json::from_str(text).map_err(SchemaError::NotJson)?;
    validate_value(&value)?;
    serde_json::from_value(value).map_err(SchemaError::Shape)
}

/// Check a JSON value against the response schema.
pub fn validate_value(value: &Value) -> Result<(), SchemaError> {
    let validator = VALIDATOR
        .as_ref()
        .map_err(|e| SchemaError::Compile(e.clone()))?;

    let errors: Vec<String> = validator
        .iter_errors(value)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::Invalid(errors))
    }
}
