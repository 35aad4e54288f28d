//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of short codes the popularity cache can hold
    pub max_cache_size: usize,
    /// Expiration sweeper interval in seconds
    pub sweep_interval: u64,
    /// Cache-size guard interval in seconds
    pub guard_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Public domain used when formatting short URLs
    pub domain: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_CACHE_SIZE` - Maximum cached short codes (default: 1000)
    /// - `SWEEP_INTERVAL` - Expiration sweep frequency in seconds (default: 20)
    /// - `GUARD_INTERVAL` - Cache-size check frequency in seconds (default: 60)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DOMAIN` - Public domain for short URLs (default: localhost:3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_cache_size: parse_var("MAX_CACHE_SIZE").unwrap_or(defaults.max_cache_size),
            sweep_interval: parse_var("SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            guard_interval: parse_var("GUARD_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.guard_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            domain: env::var("DOMAIN")
                .ok()
                .map(|d| d.trim_end_matches('/').to_string())
                .filter(|d| !d.is_empty())
                .unwrap_or(defaults.domain),
        }
    }

    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    pub fn guard_period(&self) -> Duration {
        Duration::from_secs(self.guard_interval)
    }

    /// Formats the public URL for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("https://{}/{}", self.domain, code)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_cache_size: 1000,
            sweep_interval: 20,
            guard_interval: 60,
            server_port: 3000,
            domain: "localhost:3000".to_string(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
