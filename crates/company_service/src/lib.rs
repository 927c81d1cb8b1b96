//! Company service library.
//!
//! Fetches company records from an upstream registry, normalizes them and
//! re-publishes them as HAL resources.
//!
//! ```text
//! GET /companies/{n} --> CompanyRegistry --> RegistryAdapter --> assemble --> 200 + Location
//!                              |                   |                |
//!                              +-------------------+----------------+--> ApiError
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod resource;

pub use api::{create_router, AppState};
pub use config::ServiceConfig;
pub use error::{ApiError, AssemblyError, Error, Result};
pub use resource::{assemble, HypermediaResource, Link, UriBuilder, COMPANY_ROUTE, HAL_JSON};
