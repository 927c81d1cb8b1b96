//! Companies House client configuration.

use crate::error::{Error, Result};

/// Public Companies House API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.company-information.service.gov.uk";

/// Credentials and endpoint for the Companies House API.
///
/// Built once at startup and handed to [`super::CompaniesHouseClient::from_config`].
#[derive(Clone)]
pub struct CompaniesHouseConfig {
    /// API key allocated by Companies House (the Basic-auth user name).
    pub api_key: String,
    /// Base URL of the API, without the `/company` suffix.
    pub base_url: String,
}

impl CompaniesHouseConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Load from the environment.
    ///
    /// Required:
    /// - `CH_API_KEY` - API key
    ///
    /// Optional:
    /// - `CH_API_URL` - base URL (defaults to [`DEFAULT_BASE_URL`])
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("CH_API_KEY").map_err(|_| Error::MissingEnv("CH_API_KEY"))?;
        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("CH_API_KEY is empty".to_string()));
        }
        let base_url = std::env::var("CH_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self { api_key, base_url })
    }
}

// The API key never appears in logs.
impl std::fmt::Debug for CompaniesHouseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompaniesHouseConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}
