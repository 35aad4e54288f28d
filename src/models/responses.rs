//! Response DTOs for the link API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::CacheStats;
use crate::storage::{DurableLink, DurableStats};

/// Response body for POST /links/shorten
#[derive(Debug, Clone, Serialize)]
pub struct ShortenResponse {
    pub long_link: String,
    pub short_link: String,
}

/// Response body for PUT /links/:code
#[derive(Debug, Clone, Serialize)]
pub struct RenameResponse {
    pub message: String,
    pub old_short_url: String,
    pub new_short_url: String,
}

impl RenameResponse {
    pub fn new(old_short_url: String, new_short_url: String) -> Self {
        Self {
            message: "Short code updated successfully".to_string(),
            old_short_url,
            new_short_url,
        }
    }
}

/// Response body for DELETE /links/:code
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub short_code: String,
}

impl DeleteResponse {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            message: "Link successfully deleted".to_string(),
            short_code: short_code.into(),
        }
    }
}

/// Response body for GET /links/:code/stats
#[derive(Debug, Clone, Serialize)]
pub struct LinkStatsResponse {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub access_count: u64,
    pub last_access: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<(DurableLink, DurableStats)> for LinkStatsResponse {
    fn from((link, stats): (DurableLink, DurableStats)) -> Self {
        Self {
            original_url: link.original_url,
            created_at: link.created_at,
            access_count: stats.access_count,
            last_access: stats.last_access,
            expires_at: link.expires_at,
        }
    }
}

/// Response body for GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub max_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            max_entries: stats.max_entries,
        }
    }
}

/// Response body for POST /admin/sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepResponse {
    pub deleted: usize,
}

/// Response body for POST /admin/cache-check
#[derive(Debug, Clone, Serialize)]
pub struct CacheCheckResponse {
    pub evicted: usize,
    pub total_entries: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
