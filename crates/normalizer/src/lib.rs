//! Normalizer for upstream company-registry payloads.
//!
//! Walks the untyped JSON tree returned by a registry and produces a
//! [`CompanyRecord`], deciding section by section whether a value is
//! mandatory, mandatory-if-present, or independently optional.
//!
//! # Architecture
//!
//! ```text
//! Raw JSON (bytes) --> RegistryAdapter --> CompanyRecord
//!                      (parse & normalize)    or NormalizationError
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use normalizer::{CompaniesHouseAdapter, RegistryAdapter};
//!
//! let adapter = CompaniesHouseAdapter::new();
//! let record = adapter.parse_and_normalize(&payload, "00000006")?;
//! ```

pub mod companies_house;
pub mod error;
pub mod fields;
pub mod schema;
pub mod traits;

// Re-export core types
pub use error::{NormalizationError, Result};
pub use schema::{
    AccountingReferenceDate, Accounts, CompanyRecord, ConfirmationStatement, LastAccounts,
    NextAccounts, RegisteredOfficeAddress,
};
pub use traits::RegistryAdapter;

// Re-export registry adapters
pub use companies_house::CompaniesHouseAdapter;
