//! Companies House REST API client.
//!
//! Provides the authenticated HTTP client and its configuration.

pub mod client;
pub mod config;

pub use client::{basic_auth_value, default_headers, CompaniesHouseClient};
pub use config::{CompaniesHouseConfig, DEFAULT_BASE_URL};
