//! HTTP API handlers for the company service.
//!
//! Routes:
//! - GET /health - Health check
//! - GET /companies/{company_number} - Normalized company resource (HAL)
//!
//! Each request runs fetch -> normalize -> assemble -> respond with no shared
//! mutable state. The upstream call is the only await point; if the caller
//! disconnects, axum drops the handler future and the pending upstream
//! request with it.

use crate::error::{ApiError, AssemblyError};
use crate::resource::{assemble, HypermediaResource, UriBuilder, COMPANY_ROUTE, HAL_JSON};
use axum::{
    extract::{Path, State},
    http::{
        header::{CONTENT_TYPE, HOST, LOCATION},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use external_services::CompanyRegistry;
use metrics::counter;
use normalizer::{CompanyRecord, RegistryAdapter};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// Application state.
pub struct AppState<A: RegistryAdapter> {
    pub registry: Arc<dyn CompanyRegistry>,
    pub adapter: A,
    /// Configured public base; when `None` the `Host` header is used.
    pub public_base_url: Option<UriBuilder>,
}

impl<A: RegistryAdapter> AppState<A> {
    /// Base for links of the current request.
    fn uri_builder(
        &self,
        headers: &HeaderMap,
        company_number: &str,
    ) -> std::result::Result<UriBuilder, AssemblyError> {
        if let Some(builder) = &self.public_base_url {
            return Ok(builder.clone());
        }

        let host = headers
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AssemblyError::LinkGenerationFailure {
                company_number: company_number.to_string(),
                reason: "no public base URL configured and no Host header".to_string(),
            })?;

        UriBuilder::from_host(host).map_err(|reason| AssemblyError::LinkGenerationFailure {
            company_number: company_number.to_string(),
            reason,
        })
    }
}

/// Create the API router.
pub fn create_router<A: RegistryAdapter>(state: AppState<A>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(COMPANY_ROUTE, get(get_company_handler::<A>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Health check endpoint.
/// GET /health
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Get the normalized resource for one company.
/// GET /companies/{company_number}
async fn get_company_handler<A: RegistryAdapter>(
    State(state): State<Arc<AppState<A>>>,
    Path(company_number): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    info!("Retrieving company details for company number {}", company_number);

    let resource = fetch_company_resource(&state, &company_number, &headers).await?;
    let response = render(&resource, &company_number)?;

    counter!("company_requests_total", "outcome" => "ok").increment(1);
    Ok(response)
}

/// Fetch, normalize and assemble one company.
async fn fetch_company_resource<A: RegistryAdapter>(
    state: &AppState<A>,
    company_number: &str,
    headers: &HeaderMap,
) -> Result<HypermediaResource<CompanyRecord>, ApiError> {
    let payload = state
        .registry
        .fetch_company(company_number)
        .await
        .map_err(|e| ApiError::from_registry(company_number, e))?;

    debug!(
        "[{}] Received {} bytes for company {}",
        state.registry.name(),
        payload.len(),
        company_number
    );

    let record = state
        .adapter
        .parse_and_normalize(&payload, company_number)
        .map_err(|source| ApiError::Normalization {
            company_number: company_number.to_string(),
            source,
        })?;

    let uri_builder = state.uri_builder(headers, company_number)?;
    Ok(assemble(record, company_number, &uri_builder)?)
}

fn render(
    resource: &HypermediaResource<CompanyRecord>,
    company_number: &str,
) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(resource).map_err(|source| ApiError::Serialization {
        company_number: company_number.to_string(),
        source,
    })?;

    let location = HeaderValue::from_str(resource.location.as_str()).map_err(|e| {
        AssemblyError::LinkGenerationFailure {
            company_number: company_number.to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, HeaderValue::from_static(HAL_JSON)),
            (LOCATION, location),
        ],
        body,
    )
        .into_response())
}
