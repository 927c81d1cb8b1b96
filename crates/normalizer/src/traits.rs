//! Core trait for registry adapters (plugin interface).
//!
//! To normalize payloads from another registry, implement `RegistryAdapter`.
//!
//! # Example
//!
//! ```ignore
//! pub struct OpenCorporatesAdapter;
//!
//! impl RegistryAdapter for OpenCorporatesAdapter {
//!     const NAME: &'static str = "open_corporates";
//!
//!     fn normalize(&self, root: &Value, company_number: &str) -> Result<CompanyRecord> {
//!         // Walk the OpenCorporates tree
//!     }
//! }
//! ```

use crate::error::Result;
use crate::schema::CompanyRecord;
use serde_json::Value;

/// Core trait for registry adapters.
///
/// The request pipeline is generic over this trait. Implementations must be
/// pure: the same payload always yields the same record or the same error.
pub trait RegistryAdapter: Send + Sync + 'static {
    /// Registry name (e.g., "companies_house").
    const NAME: &'static str;

    /// Normalize an already-parsed JSON tree.
    ///
    /// `company_number` is supplied by the caller; it is never read from the payload.
    fn normalize(&self, root: &Value, company_number: &str) -> Result<CompanyRecord>;

    /// Parse raw bytes and normalize them.
    fn parse_and_normalize(&self, payload: &[u8], company_number: &str) -> Result<CompanyRecord> {
        let root: Value = serde_json::from_slice(payload)?;
        self.normalize(&root, company_number)
    }
}
