//! Error types for waypoint-agent

use thiserror::Error;

use crate::schema::SchemaError;

/// Result type alias using waypoint-agent Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while planning
#[derive(Error, Debug)]
pub enum Error {
    /// The caller sent a malformed request
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// The model output did not match the response schema
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An error from the model provider layer
    #[error(transparent)]
    Ai(#[from] waypoint_ai::Error),
}

impl Error {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Check if a model failure needs operator attention (credentials,
    /// unknown model, rejected request) rather than a later retry
    pub fn needs_attention(&self) -> bool {
        match self {
            Error::Ai(e) => {
                !e.is_transient() && !matches!(e, waypoint_ai::Error::UnexpectedResponse(_))
            }
            _ => false,
        }
    }

    /// The offending field, for validation errors
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display_names_field() {
        let e = Error::validation("goal", "must not be empty");
        assert_eq!(e.to_string(), "goal: must not be empty");
        assert_eq!(e.field(), Some("goal"));
        assert!(e.is_validation());
    }

    #[test]
    fn test_model_errors_are_not_validation() {
        let e = Error::from(waypoint_ai::Error::InvalidApiKey);
        assert!(!e.is_validation());
        assert!(e.field().is_none());

        let e = Error::from(SchemaError::Empty);
        assert!(!e.is_validation());
    }

    #[test]
    fn test_needs_attention() {
        assert!(Error::from(waypoint_ai::Error::InvalidApiKey).needs_attention());
        assert!(Error::from(waypoint_ai::Error::Auth("bad key".into())).needs_attention());
        assert!(Error::from(waypoint_ai::Error::api("invalid_request_error", "Unknown model")).needs_attention());

        assert!(!Error::from(waypoint_ai::Error::RateLimited { retry_after: None }).needs_attention());
        assert!(!Error::from(waypoint_ai::Error::api("server_error", "try again")).needs_attention());
        assert!(!Error::from(SchemaError::Empty).needs_attention());
        assert!(!Error::validation("goal", "empty").needs_attention());
    }
}
