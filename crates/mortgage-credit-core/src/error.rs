use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MortgageCreditError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Validation failed: {field} — {reason}")]
    Validation { field: String, reason: String },

    #[error("Evaluation incomplete: missing assertions for {}", missing.join(", "))]
    IncompleteAssertions { missing: Vec<String> },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid step: cannot {action} while at {step}")]
    InvalidStep { step: String, action: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageCreditError {
    pub(crate) fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        MortgageCreditError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(field: &str, reason: impl Into<String>) -> Self {
        MortgageCreditError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MortgageCreditError {
    fn from(e: serde_json::Error) -> Self {
        MortgageCreditError::SerializationError(e.to_string())
    }
}
