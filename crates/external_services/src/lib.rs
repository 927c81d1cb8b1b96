//! Upstream company-registry API clients.
//!
//! This library provides access to the registries the company service reads from:
//! - Companies House: UK company register (REST, Basic auth with an API key)
//!
//! The request pipeline only sees the [`CompanyRegistry`] trait, so tests and
//! alternative registries can stand in for the real client.
//!
//! # Example
//!
//! ```ignore
//! use external_services::companies_house::CompaniesHouseClient;
//! use external_services::CompanyRegistry;
//!
//! let client = CompaniesHouseClient::with_base_url(&api_key, "https://api.company-information.service.gov.uk")?;
//! let payload = client.fetch_company("00000006").await?;
//! ```

pub mod companies_house;
pub mod error;
pub mod registry;

pub use error::{Error, Result};
pub use registry::CompanyRegistry;
