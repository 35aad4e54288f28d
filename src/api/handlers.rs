//! API Handlers
//!
//! HTTP request handlers for each link service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::PopularityCache;
use crate::config::Config;
use crate::error::{LinkError, Result};
use crate::models::{
    CacheCheckResponse, CacheStatsResponse, DeleteResponse, HealthResponse, LinkStatsResponse,
    RenameRequest, RenameResponse, ShortenRequest, ShortenResponse, SweepResponse,
};
use crate::service::LinkService;
use crate::storage::MemoryLinkStore;

/// Application state shared across all handlers.
///
/// The service is cheap to clone; the cache and the durable store sit
/// behind `Arc`s and synchronize internally.
#[derive(Clone)]
pub struct AppState {
    pub service: LinkService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(service: LinkService, config: Config) -> Self {
        Self {
            service,
            config: Arc::new(config),
        }
    }

    /// Creates a new AppState backed by an in-memory durable store.
    pub fn from_config(config: &Config) -> Self {
        let cache = Arc::new(PopularityCache::new(config.max_cache_size));
        let service = LinkService::new(cache, Arc::new(MemoryLinkStore::new()));
        Self::new(service, config.clone())
    }
}

// == Link Handlers ==

/// Handler for POST /links/shorten
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(req): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    if let Some(error_msg) = req.validate() {
        return Err(LinkError::InvalidRequest(error_msg));
    }

    let link = state
        .service
        .create_link(req.long_link.trim(), req.alias.as_deref(), req.expires_at)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_link: state.config.short_url(&link.short_code),
            long_link: link.original_url,
        }),
    ))
}

/// Handler for GET /links/:code
///
/// Redirects to the destination URL with 307 Temporary Redirect.
///
/// A stored URL that cannot be sent as a `Location` header is an error
/// response, not a panic.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    let url = state.service.resolve_short_code(&code).await?;
    let location = HeaderValue::from_str(&url).map_err(|_| {
        LinkError::Internal(format!("destination of {} is not a valid Location header", code))
    })?;
    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}

/// Handler for PUT /links/:code
pub async fn rename_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<RenameResponse>> {
    let link = state
        .service
        .change_short_code(&code, req.new_short_code.trim())
        .await?;

    Ok(Json(RenameResponse::new(
        state.config.short_url(&code),
        state.config.short_url(&link.short_code),
    )))
}

/// Handler for DELETE /links/:code
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DeleteResponse>> {
    state.service.delete_link(&code).await?;
    Ok(Json(DeleteResponse::new(code)))
}

/// Handler for GET /links/:code/stats
pub async fn link_stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<LinkStatsResponse>> {
    let record = state.service.link_stats(&code).await?;
    Ok(Json(LinkStatsResponse::from(record)))
}

// == Operational Handlers ==

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::from(state.service.cache().stats()))
}

/// Handler for POST /admin/sweep
///
/// Runs one expiration sweep immediately.
pub async fn sweep_handler(State(state): State<AppState>) -> Result<Json<SweepResponse>> {
    let deleted = state.service.run_expiration_sweep().await?;
    Ok(Json(SweepResponse { deleted }))
}

/// Handler for POST /admin/cache-check
///
/// Runs one cache-size guard pass immediately.
pub async fn cache_check_handler(State(state): State<AppState>) -> Json<CacheCheckResponse> {
    let evicted = state.service.run_cache_size_check();
    Json(CacheCheckResponse {
        evicted,
        total_entries: state.service.cache().size(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
