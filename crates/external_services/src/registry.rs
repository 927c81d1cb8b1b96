//! Registry trait used by the request pipeline.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// A source of raw company records.
///
/// One call performs exactly one upstream attempt. Implementations must not
/// retry or cache; a non-2xx answer is reported as [`crate::Error::Upstream`]
/// with the original status and body.
#[async_trait]
pub trait CompanyRegistry: Send + Sync {
    /// Registry name used in logs (e.g., "companies_house").
    fn name(&self) -> &'static str;

    /// Fetch the raw JSON payload for one company.
    async fn fetch_company(&self, company_number: &str) -> Result<Bytes>;
}
