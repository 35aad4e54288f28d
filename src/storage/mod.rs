//! Durable Store Module
//!
//! The authoritative record of links and their access statistics. The cache
//! layer only ever talks to it through [`LinkRepository`].

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use memory::MemoryLinkStore;

/// A stored short link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableLink {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    /// When the link expires, if ever
    pub expires_at: Option<DateTime<Utc>>,
    /// Owning user, None for anonymous links
    pub user_id: Option<i64>,
}

impl DurableLink {
    /// Creates a link created now, with no expiry and no owner.
    pub fn new(short_code: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
            original_url: original_url.into(),
            created_at: Utc::now(),
            expires_at: None,
            user_id: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: Option<DateTime<Utc>>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// A link is expired once `expires_at` is strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expires_at, Some(expires) if expires < now)
    }
}

/// Access statistics for one link, keyed by its short code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableStats {
    pub short_code: String,
    pub access_count: u64,
    pub last_access: Option<DateTime<Utc>>,
}

/// Durable link storage.
///
/// Every method is one transaction. Implementations may block on I/O, so
/// callers must not hold cache locks across these calls.
#[async_trait]
pub trait LinkRepository: Send + Sync + 'static {
    /// Returns the link for a code, expired or not.
    async fn find_link_by_code(&self, code: &str) -> Result<Option<DurableLink>>;

    /// Returns every link whose expiry is set and earlier than `now`.
    async fn find_expired_links(&self, now: DateTime<Utc>) -> Result<Vec<DurableLink>>;

    async fn find_stats_by_code(&self, code: &str) -> Result<Option<DurableStats>>;

    /// Creates or overwrites the stats row of an existing link.
    ///
    /// Returns `NotFound` if no link has this code.
    async fn upsert_stats(
        &self,
        code: &str,
        access_count: u64,
        last_access: Option<DateTime<Utc>>,
    ) -> Result<()>;

    /// Atomically adds one access at time `at`.
    ///
    /// Returns the updated row, or None when the stats row is missing.
    async fn increment_stats(&self, code: &str, at: DateTime<Utc>)
        -> Result<Option<DurableStats>>;

    /// Inserts a new link. Returns `Conflict` if the code is taken.
    async fn insert_link(&self, link: DurableLink) -> Result<()>;

    /// Moves a link and its stats row to a new code.
    ///
    /// Returns `NotFound` if `old_code` is absent and `Conflict` if
    /// `new_code` is taken.
    async fn rename_link(&self, old_code: &str, new_code: &str) -> Result<DurableLink>;

    /// Deletes a link and its stats row. Returns true if the link existed.
    async fn delete_link_and_stats(&self, code: &str) -> Result<bool>;
}
