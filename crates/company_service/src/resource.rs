//! Hypermedia resource assembly.
//!
//! Wraps a normalized record in a HAL document with a `self` link and
//! computes the canonical `Location` of the resource. Links come from the
//! static [`COMPANY_ROUTE`] template; nothing is looked up at runtime.

use crate::error::AssemblyError;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Route template of the company resource.
pub const COMPANY_ROUTE: &str = "/companies/{company_number}";

/// Media type of assembled resources.
pub const HAL_JSON: &str = "application/hal+json";

/// A HAL link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
}

/// A record plus its named links.
///
/// Serializes as the record's own fields followed by a `_links` object.
#[derive(Debug, Clone, Serialize)]
pub struct HypermediaResource<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
    /// Canonical URI, sent as the `Location` header.
    #[serde(skip)]
    pub location: Url,
}

impl<T> HypermediaResource<T> {
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }

    pub fn self_link(&self) -> Option<&Link> {
        self.link("self")
    }
}

/// Absolute base against which resource URIs are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriBuilder {
    base: Url,
}

impl UriBuilder {
    /// Use a configured public base URL (e.g. `https://api.example.com/v1`).
    pub fn parse(base: &str) -> std::result::Result<Self, String> {
        let base = Url::parse(base).map_err(|e| format!("invalid base URL '{}': {}", base, e))?;
        if base.cannot_be_a_base() {
            return Err(format!("base URL '{}' cannot carry a path", base));
        }
        Ok(Self { base })
    }

    /// Derive the base from a request's `Host` header.
    pub fn from_host(host: &str) -> std::result::Result<Self, String> {
        let builder = Self::parse(&format!("http://{}", host))?;
        let base = &builder.base;
        if base.path() != "/"
            || base.query().is_some()
            || base.fragment().is_some()
            || !base.username().is_empty()
            || base.password().is_some()
        {
            return Err(format!("invalid Host header '{}'", host));
        }
        Ok(builder)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute URI of one company resource.
    pub fn company_uri(&self, company_number: &str) -> std::result::Result<Url, AssemblyError> {
        let failure = |reason: String| AssemblyError::LinkGenerationFailure {
            company_number: company_number.to_string(),
            reason,
        };

        if company_number.is_empty() {
            return Err(failure("company number is empty".to_string()));
        }

        let mut uri = self.base.clone();
        {
            let mut segments = uri
                .path_segments_mut()
                .map_err(|_| failure(format!("base URL '{}' cannot carry a path", self.base)))?;
            segments.pop_if_empty();
            for part in COMPANY_ROUTE.trim_start_matches('/').split('/') {
                match part {
                    "{company_number}" => segments.push(company_number),
                    literal => segments.push(literal),
                };
            }
        }
        Ok(uri)
    }
}

/// Wrap `record` in a hypermedia resource addressed by `company_number`.
pub fn assemble<T>(
    record: T,
    company_number: &str,
    uri_builder: &UriBuilder,
) -> std::result::Result<HypermediaResource<T>, AssemblyError> {
    let location = uri_builder.company_uri(company_number)?;

    let mut links = BTreeMap::new();
    links.insert(
        "self".to_string(),
        Link {
            href: location.to_string(),
        },
    );

    Ok(HypermediaResource {
        content: record,
        links,
        location,
    })
}
