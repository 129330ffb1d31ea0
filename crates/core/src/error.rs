use serde_json::Value;

/// Domain-level error taxonomy shared by every layer.
///
/// The API crate maps each variant onto an HTTP status and an error code in
/// the `{ "error": { ... } }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required input is absent.
    #[error("Required parameter missing: {0}")]
    MissingParameter(&'static str),

    /// An input is present but malformed or out of range.
    #[error("Invalid parameter {param}: {message}")]
    InvalidParameter {
        param: &'static str,
        message: String,
    },

    /// A request body violates a business rule. `details` carries the
    /// offending field(s) when known.
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn invalid_param(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            message: message.into(),
        }
    }

    /// Validation error with a structured `details` object.
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }
}
