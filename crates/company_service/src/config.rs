//! Service configuration.
//!
//! Read once at startup and passed explicitly into the router state.

use crate::error::{Error, Result};
use crate::resource::UriBuilder;
use external_services::companies_house::CompaniesHouseConfig;

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_METRICS_PORT: u16 = 9090;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub companies_house: CompaniesHouseConfig,
    pub http_port: u16,
    pub metrics_port: u16,
    /// Base for self links and `Location`. `None` derives it from each request's `Host`.
    pub public_base_url: Option<UriBuilder>,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `CH_API_KEY`
    ///
    /// Optional:
    /// - `CH_API_URL`, `HTTP_PORT` (8080), `METRICS_PORT` (9090), `PUBLIC_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let companies_house = CompaniesHouseConfig::from_env()?;

        Ok(Self {
            companies_house,
            http_port: parse_port("HTTP_PORT", std::env::var("HTTP_PORT").ok(), DEFAULT_HTTP_PORT)?,
            metrics_port: parse_port(
                "METRICS_PORT",
                std::env::var("METRICS_PORT").ok(),
                DEFAULT_METRICS_PORT,
            )?,
            public_base_url: parse_base_url(std::env::var("PUBLIC_BASE_URL").ok())?,
        })
    }
}

fn parse_port(var: &str, raw: Option<String>, default: u16) -> Result<u16> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidConfig(format!("{} must be a port number, got '{}'", var, raw))),
    }
}

fn parse_base_url(raw: Option<String>) -> Result<Option<UriBuilder>> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => UriBuilder::parse(raw.trim())
            .map(Some)
            .map_err(|e| Error::InvalidConfig(format!("PUBLIC_BASE_URL: {}", e))),
        _ => Ok(None),
    }
}
