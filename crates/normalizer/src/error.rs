//! Normalization error types.

use thiserror::Error;

/// Why an upstream payload could not be normalized.
///
/// Field names are dotted upstream paths (e.g. `accounts.next_accounts.due_on`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// The payload is not JSON, or its root is not an object.
    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("Missing mandatory field: {field}")]
    MissingMandatoryField { field: String },

    #[error("Invalid date in {field}: {raw_value:?}")]
    InvalidDate { field: String, raw_value: String },

    /// Present, but of a JSON type that cannot be coerced to the expected one.
    #[error("Invalid value in {field}: {raw_value}")]
    InvalidValue { field: String, raw_value: String },
}

impl NormalizationError {
    /// Offending field path, if the failure is tied to one field.
    pub fn field(&self) -> Option<&str> {
        match self {
            NormalizationError::Malformed(_) => None,
            NormalizationError::MissingMandatoryField { field }
            | NormalizationError::InvalidDate { field, .. }
            | NormalizationError::InvalidValue { field, .. } => Some(field),
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            NormalizationError::Malformed(_) => "malformed",
            NormalizationError::MissingMandatoryField { .. } => "missing_mandatory_field",
            NormalizationError::InvalidDate { .. } => "invalid_date",
            NormalizationError::InvalidValue { .. } => "invalid_value",
        }
    }
}

impl From<serde_json::Error> for NormalizationError {
    fn from(e: serde_json::Error) -> Self {
        NormalizationError::Malformed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
