//! Error types for the company service.
//!
//! [`ApiError`] translates pipeline failures into HTTP responses: upstream
//! failures pass through verbatim, everything else becomes an empty 500.

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use metrics::counter;
use normalizer::NormalizationError;
use thiserror::Error;
use tracing::{error, warn};

/// Startup and configuration errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("External service error: {0}")]
    ExternalService(#[from] external_services::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to build the links of a resource.
///
/// This is a configuration fault, never a data fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Failed to generate links for company {company_number}: {reason}")]
    LinkGenerationFailure {
        company_number: String,
        reason: String,
    },
}

/// Failure of one request pipeline.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream answered with a non-2xx status.
    #[error("Upstream returned {status} for company {company_number}")]
    Upstream {
        company_number: String,
        status: u16,
        body: Bytes,
        content_type: Option<String>,
    },

    /// Upstream could not be reached.
    #[error("Upstream request failed for company {company_number}: {source}")]
    Transport {
        company_number: String,
        #[source]
        source: external_services::Error,
    },

    #[error("Failed to normalize company {company_number}: {source}")]
    Normalization {
        company_number: String,
        #[source]
        source: NormalizationError,
    },

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("Failed to serialize company {company_number}: {source}")]
    Serialization {
        company_number: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Classify a registry failure.
    pub fn from_registry(company_number: &str, err: external_services::Error) -> Self {
        match err {
            external_services::Error::Upstream {
                status,
                body,
                content_type,
            } => ApiError::Upstream {
                company_number: company_number.to_string(),
                status,
                body,
                content_type,
            },
            other => ApiError::Transport {
                company_number: company_number.to_string(),
                source: other,
            },
        }
    }

    pub fn company_number(&self) -> &str {
        match self {
            ApiError::Upstream { company_number, .. }
            | ApiError::Transport { company_number, .. }
            | ApiError::Normalization { company_number, .. }
            | ApiError::Serialization { company_number, .. } => company_number,
            ApiError::Assembly(AssemblyError::LinkGenerationFailure { company_number, .. }) => {
                company_number
            }
        }
    }

    /// Status the caller sees.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Upstream { .. } => "upstream_error",
            _ => "internal_error",
        }
    }

    fn log(&self) {
        match self {
            ApiError::Upstream {
                company_number,
                status,
                ..
            } => {
                warn!(
                    "Passing through upstream status {} for company {}",
                    status, company_number
                );
            }
            ApiError::Normalization {
                company_number,
                source,
            } => {
                error!(
                    company_number = %company_number,
                    field = source.field().unwrap_or("-"),
                    kind = source.kind(),
                    "Error normalizing company response: {}",
                    source
                );
            }
            ApiError::Assembly(err) => {
                error!(
                    company_number = %self.company_number(),
                    "Failure generating HAL relations - please investigate: {}",
                    err
                );
            }
            other => {
                error!(company_number = %other.company_number(), "{:?}", other);
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        counter!("company_requests_total", "outcome" => self.outcome()).increment(1);

        let status = self.status();
        match self {
            ApiError::Upstream {
                body, content_type, ..
            } => {
                let mut response = Response::new(Body::from(body));
                *response.status_mut() = status;
                if let Some(value) = content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                    response.headers_mut().insert(CONTENT_TYPE, value);
                }
                response
            }
            _ => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(status: u16) -> external_services::Error {
        external_services::Error::Upstream {
            status,
            body: Bytes::from_static(br#"{"error":"not found"}"#),
            content_type: Some("application/json".to_string()),
        }
    }

    #[test]
    fn test_from_registry_upstream() {
        let err = ApiError::from_registry("00000006", upstream(404));
        assert!(matches!(err, ApiError::Upstream { status: 404, .. }));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.outcome(), "upstream_error");
        assert_eq!(err.company_number(), "00000006");
    }

    #[test]
    fn test_from_registry_transport() {
        let err = ApiError::from_registry(
            "00000006",
            external_services::Error::InvalidConfig("bad".to_string()),
        );
        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.outcome(), "internal_error");
    }

    #[test]
    fn test_internal_failures_are_500() {
        let err = ApiError::Normalization {
            company_number: "00000006".to_string(),
            source: NormalizationError::InvalidDate {
                field: "accounts.next_accounts.due_on".to_string(),
                raw_value: "soon".to_string(),
            },
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from(AssemblyError::LinkGenerationFailure {
            company_number: "00000006".to_string(),
            reason: "no base URL".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.company_number(), "00000006");
    }

    #[test]
    fn test_upstream_response_keeps_content_type() {
        let response = ApiError::from_registry("00000006", upstream(503)).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_internal_response_has_no_content_type() {
        let response = ApiError::Normalization {
            company_number: "00000006".to_string(),
            source: NormalizationError::Malformed("eof".to_string()),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }
}
