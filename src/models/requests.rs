//! Request DTOs for the link API
//!
//! Defines the structure of incoming HTTP request bodies.

use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Request body for POST /links/shorten
///
/// # Fields
/// - `long_link`: The destination URL
/// - `alias`: Optional custom short code
/// - `expires_at`: Optional RFC 3339 expiry time
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenRequest {
    pub long_link: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let link = self.long_link.trim();
        if link.is_empty() {
            return Some("long_link cannot be empty".to_string());
        }
        if !(link.starts_with("http://") || link.starts_with("https://")) {
            return Some("long_link must start with http:// or https://".to_string());
        }
        // The link ends up in a Location header on every redirect.
        if link.chars().any(char::is_control) || HeaderValue::from_str(link).is_err() {
            return Some("long_link contains characters not allowed in a URL".to_string());
        }
        None
    }
}

/// Request body for PUT /links/:code
#[derive(Debug, Clone, Deserialize)]
pub struct RenameRequest {
    /// Replacement short code
    pub new_short_code: String,
}
