//! Cache Entry Module
//!
//! Defines the cached copy of a durable link together with its access counter.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A derived, disposable copy of a durable link held in the popularity cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The short code this entry is keyed by
    pub short_code: String,
    /// Where the short code redirects to
    pub destination_url: String,
    /// Number of accesses recorded while cached (mirrors the ranking score)
    pub access_count: u64,
    /// Copy of the durable expiry, None = never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new non-expiring entry.
    pub fn new(
        short_code: impl Into<String>,
        destination_url: impl Into<String>,
        access_count: u64,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            destination_url: destination_url.into(),
            access_count,
            expires_at: None,
        }
    }

    /// Sets the expiry copied from the durable record.
    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    // == Is Expired ==
    /// Checks whether the entry is past its expiry at `now`.
    ///
    /// Uses the same strict comparison as the durable store: an entry whose
    /// `expires_at` equals `now` is still live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires) if expires < now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
