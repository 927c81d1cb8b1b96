//! Companies House REST API client.

use crate::companies_house::config::{CompaniesHouseConfig, DEFAULT_BASE_URL};
use crate::error::{Error, Result};
use crate::registry::CompanyRegistry;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use metrics::counter;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use tracing::{debug, info};
use url::Url;

/// Companies House REST API client.
///
/// The default headers (cache control, accept, credentials) are fixed at
/// construction; the client is cheap to clone and shared read-only across
/// requests.
#[derive(Debug, Clone)]
pub struct CompaniesHouseClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CompaniesHouseClient {
    /// Create a client for the public Companies House endpoint.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidConfig(format!("invalid base URL '{}': {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidConfig(format!(
                "base URL '{}' cannot carry a path",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .default_headers(default_headers(api_key)?)
            .build()?;

        info!("Companies House client configured for {}", base_url);

        Ok(Self { http, base_url })
    }

    /// Create a client from startup configuration.
    pub fn from_config(config: &CompaniesHouseConfig) -> Result<Self> {
        Self::with_base_url(&config.api_key, &config.base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/company/{company_number}`, escaping the number as one path segment.
    pub fn company_url(&self, company_number: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidConfig(format!("base URL '{}' cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push("company")
            .push(company_number);
        Ok(url)
    }
}

#[async_trait]
impl CompanyRegistry for CompaniesHouseClient {
    fn name(&self) -> &'static str {
        "companies_house"
    }

    async fn fetch_company(&self, company_number: &str) -> Result<Bytes> {
        let url = self.company_url(company_number)?;
        debug!("Fetching company {} from {}", company_number, url);

        let response = self.http.get(url).send().await?;
        let status = response.status();

        counter!(
            "upstream_requests_total",
            "status" => status.as_u16().to_string()
        )
        .increment(1);

        if !status.is_success() {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?;

            debug!(
                "Upstream returned {} for company {} ({} bytes)",
                status,
                company_number,
                body.len()
            );

            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
                content_type,
            });
        }

        Ok(response.bytes().await?)
    }
}

/// `Authorization` value: the API key is the user name and the password is empty.
pub fn basic_auth_value(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:", api_key)))
}

/// Headers sent with every upstream request.
pub fn default_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("text/json"));

    let mut auth = HeaderValue::from_str(&basic_auth_value(api_key))
        .map_err(|_| Error::InvalidConfig("API key contains invalid header characters".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    Ok(headers)
}
