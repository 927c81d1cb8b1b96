//! Error types for external services.

use bytes::Bytes;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: no HTTP status was received from upstream.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status. The body is kept verbatim.
    #[error("Upstream returned status {status}")]
    Upstream {
        status: u16,
        body: Bytes,
        content_type: Option<String>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
