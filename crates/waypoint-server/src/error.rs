//! Error responses for the HTTP surface

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body returned for rejected requests
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// A request the endpoint refused to plan for
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, field: Option<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                field,
            },
        }
    }
}

impl From<waypoint_agent::Error> for ApiError {
    fn from(err: waypoint_agent::Error) -> Self {
        if err.is_validation() {
            let field = err.field().map(str::to_string);
            return Self::bad_request(err.to_string(), field);
        }
        // The planner recovers every model failure itself.
        tracing::error!("Planner returned a non-validation error: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: "internal error".to_string(),
                field: None,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body ({}): {}", rejection.status(), rejection.body_text());
        Self::bad_request(rejection.body_text(), None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
