//! Error types for the authorization engine

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Authorization engine errors
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Strict authorization failed; carries the structured denial outcome
    #[error("unauthorized: {0}")]
    Unauthorized(Denial),

    /// A caller-supplied validator returned an error; propagated unmodified
    #[error("validator failed: {0}")]
    Validator(#[from] anyhow::Error),
}

impl AuthzError {
    /// The denial outcome, when this error came from `authorize`
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            AuthzError::Unauthorized(denial) => Some(denial),
            AuthzError::Validator(_) => None,
        }
    }
}

/// Structured denial raised by the strict `authorize` entry point
///
/// `result` holds the raw evaluation result of the last failing rule, so
/// callers can surface a human-readable reason. When no rule matched at all
/// it is `false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Denial {
    /// Denial classification
    pub kind: DenialKind,

    /// Raw result returned by the last failing rule's validator
    pub result: Value,
}

impl Denial {
    pub fn new(result: Value) -> Self {
        Self {
            kind: DenialKind::Unauthorized,
            result,
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Value::String(reason) => write!(f, "{reason}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Denial classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// The actor is not allowed to perform the action on the subject
    Unauthorized,
}

impl DenialKind {
    /// HTTP status code equivalent for embedding web layers
    pub const fn status_code(self) -> u16 {
        match self {
            DenialKind::Unauthorized => 401,
        }
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, AuthzError>;
