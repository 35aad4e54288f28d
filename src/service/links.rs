use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::cache::PopularityCache;
use crate::error::{LinkError, Result};
use crate::service::{generate_short_code, validate_short_code, MAX_GENERATION_ATTEMPTS};
use crate::storage::{DurableLink, DurableStats, LinkRepository};

// == Link Service ==
/// Resolves short codes through the popularity cache, falling back to the
/// durable store, and keeps the two in step.
///
/// The durable store is ground truth. The cache counter is a shadow of the
/// durable counter that is re-derived whenever the two are seen to disagree.
#[derive(Clone)]
pub struct LinkService {
    cache: Arc<PopularityCache>,
    repo: Arc<dyn LinkRepository>,
}

impl LinkService {
    // == Constructor ==
    pub fn new(cache: Arc<PopularityCache>, repo: Arc<dyn LinkRepository>) -> Self {
        Self { cache, repo }
    }

    pub fn cache(&self) -> &Arc<PopularityCache> {
        &self.cache
    }


    // == Resolve ==
    /// Returns the destination URL for a short code and records the access.
    ///
    /// Errors with `NotFound` when neither store knows the code and with
    /// `Expired` when the durable record is past its expiry, in which case
    /// both stores have been purged before returning.
    pub async fn resolve_short_code(&self, code: &str) -> Result<String> {
        let now = Utc::now();

        if let Some(entry) = self.cache.lookup(code) {
            if entry.is_expired_at(now) {
                self.purge(code).await?;
                return Err(LinkError::Expired(code.to_string()));
            }

            self.record_cached_access(code, now).await?;
            return Ok(entry.destination_url);
        }

        self.resolve_from_store(code, now).await
    }

    async fn record_cached_access(&self, code: &str, now: DateTime<Utc>) -> Result<()> {
        if self.cache.record_access(code).is_none() {
            warn!(code = %code, desync = "cache_entry_missing", "cached link vanished before its access was counted");
        }

        if self.repo.increment_stats(code, now).await?.is_some() {
            return Ok(());
        }

        warn!(code = %code, desync = "durable_stats_missing", "cached link has no durable stats, resyncing");
        match self.resync_entry(code).await? {
            Some(_) => Ok(()),
            None => Err(LinkError::NotFound(code.to_string())),
        }
    }

    async fn resolve_from_store(&self, code: &str, now: DateTime<Utc>) -> Result<String> {
        let Some(link) = self.repo.find_link_by_code(code).await? else {
            return Err(LinkError::NotFound(code.to_string()));
        };

        if link.is_expired_at(now) {
            info!("Link '{}' expired at {:?}, purging", code, link.expires_at);
            self.purge(code).await?;
            return Err(LinkError::Expired(code.to_string()));
        }

        let durable_count = match self.repo.find_stats_by_code(code).await? {
            Some(stats) => stats.access_count,
            None => {
                warn!(code = %code, desync = "durable_stats_missing", "recreating empty stats row");
                self.repo.upsert_stats(code, 0, None).await?;
                0
            }
        };

        self.cache
            .put_expiring(code, &link.original_url, durable_count, link.expires_at);
        if self.cache.record_access(code).is_none() {
            debug!(code = %code, "link evicted by guard right after insert");
        }

        if self.repo.increment_stats(code, now).await?.is_none() {
            warn!(code = %code, desync = "durable_stats_missing", "stats row vanished during lookup");
        }

        Ok(link.original_url)
    }

    // == Resync ==
    /// Re-derives one cache entry from the durable store.
    ///
    /// Drops the entry if the link is gone, purges it if expired, and seeds a
    /// missing stats row from the cached counter. Returns the cached count
    /// afterwards, or None if the code is no longer cached.
    pub async fn resync_entry(&self, code: &str) -> Result<Option<u64>> {
        let Some(link) = self.repo.find_link_by_code(code).await? else {
            self.cache.remove(code);
            return Ok(None);
        };

        let now = Utc::now();
        if link.is_expired_at(now) {
            self.purge(code).await?;
            return Ok(None);
        }

        let count = match self.repo.find_stats_by_code(code).await? {
            Some(stats) => stats.access_count,
            None => {
                let seeded = self.cache.access_count(code).unwrap_or(0);
                self.repo.upsert_stats(code, seeded, Some(now)).await?;
                seeded
            }
        };

        self.cache
            .put_expiring(code, &link.original_url, count, link.expires_at);
        Ok(self.cache.access_count(code))
    }

    /// Removes a code from the cache first, then from the durable store.
    async fn purge(&self, code: &str) -> Result<bool> {
        self.cache.remove(code);
        self.repo.delete_link_and_stats(code).await
    }

    // == Cache Hooks ==
    /// Caches a link whose durable record has just been committed.
    pub fn register_link(
        &self,
        code: &str,
        destination_url: &str,
        initial_count: u64,
        expires_at: Option<DateTime<Utc>>,
    ) {
        let evicted = self
            .cache
            .put_expiring(code, destination_url, initial_count, expires_at);
        if !evicted.is_empty() {
            debug!("Registering '{}' evicted {} links", code, evicted.len());
        }
    }

    /// Moves a cached link to its new code after a durable rename commits.
    ///
    /// The new entry starts at the larger of the durable counter and the old
    /// cached counter, so popularity is never reset.
    pub async fn rename_link(&self, old_code: &str, new_code: &str) -> Result<()> {
        let shadow = self.cache.access_count(old_code);
        self.cache.remove(old_code);

        let Some(link) = self.repo.find_link_by_code(new_code).await? else {
            warn!(code = %new_code, desync = "rename_target_missing", "renamed link not found in durable store");
            return Ok(());
        };

        let count = match self.repo.find_stats_by_code(new_code).await? {
            Some(stats) => stats.access_count.max(shadow.unwrap_or(0)),
            None => {
                warn!(code = %new_code, desync = "durable_stats_missing", "seeding stats for renamed link");
                let seeded = shadow.unwrap_or(0);
                self.repo.upsert_stats(new_code, seeded, None).await?;
                seeded
            }
        };

        self.cache
            .put_expiring(new_code, &link.original_url, count, link.expires_at);
        debug!("Renamed cached link '{}' -> '{}' with count {}", old_code, new_code, count);
        Ok(())
    }

    /// Drops a link from the cache after a durable delete commits.
    pub fn unregister_link(&self, code: &str) -> bool {
        self.cache.remove(code)
    }

    // == Background Passes ==
    /// Deletes every expired link from both stores.
    ///
    /// A failure on one link is logged and skipped; the returned count only
    /// includes links actually deleted. Failing to list expired links is fatal.
    pub async fn run_expiration_sweep(&self) -> Result<usize> {
        self.run_expiration_sweep_at(Utc::now()).await
    }

    pub async fn run_expiration_sweep_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let expired = self.repo.find_expired_links(now).await?;
        let mut deleted = 0;

        for link in &expired {
            self.cache.remove(&link.short_code);
            match self.repo.delete_link_and_stats(&link.short_code).await {
                Ok(true) => deleted += 1,
                Ok(false) => debug!("Expired link '{}' was already deleted", link.short_code),
                Err(e) if e.is_fatal() => {
                    warn!("Failed to delete expired link '{}': {}", link.short_code, e)
                }
                Err(e) => debug!("Skipping expired link '{}': {}", link.short_code, e),
            }
        }

        if deleted > 0 || !expired.is_empty() {
            info!("Deleted {} of {} expired links", deleted, expired.len());
        } else {
            debug!("Expiration sweep: no expired links found");
        }
        Ok(deleted)
    }

    /// Runs one cache-size guard pass. Returns how many entries were evicted.
    pub fn run_cache_size_check(&self) -> usize {
        let evicted = self.cache.enforce_capacity().len();
        if evicted > 0 {
            info!("Cache-size check: evicted {} least popular links", evicted);
        }
        evicted
    }

    // == Link Management ==
    /// Stores a new link and caches it.
    ///
    /// Uses `alias` as the short code when given, otherwise generates one.
    pub async fn create_link(
        &self,
        long_link: &str,
        alias: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<DurableLink> {
        if matches!(expires_at, Some(expires) if expires <= Utc::now()) {
            return Err(LinkError::InvalidRequest(
                "expires_at must be in the future".to_string(),
            ));
        }

        let link = match alias {
            Some(alias) => {
                validate_short_code(alias)?;
                let link = DurableLink::new(alias, long_link).with_expiry(expires_at);
                self.repo.insert_link(link.clone()).await?;
                link
            }
            None => self.insert_generated(long_link, expires_at).await?,
        };

        self.repo.upsert_stats(&link.short_code, 0, None).await?;
        self.register_link(&link.short_code, &link.original_url, 0, link.expires_at);
        info!("Created link '{}' -> {}", link.short_code, link.original_url);
        Ok(link)
    }

    async fn insert_generated(
        &self,
        long_link: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<DurableLink> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let link = DurableLink::new(generate_short_code(), long_link).with_expiry(expires_at);
            match self.repo.insert_link(link.clone()).await {
                Ok(()) => return Ok(link),
                Err(LinkError::Conflict(code)) => debug!("Generated code '{}' is taken, retrying", code),
                Err(e) => return Err(e),
            }
        }

        Err(LinkError::Internal(format!(
            "could not generate a free short code in {} attempts",
            MAX_GENERATION_ATTEMPTS
        )))
    }

    /// Renames a link in the durable store, then moves its cache entry.
    pub async fn change_short_code(&self, old_code: &str, new_code: &str) -> Result<DurableLink> {
        validate_short_code(new_code)?;
        let link = self.repo.rename_link(old_code, new_code).await?;
        self.rename_link(old_code, new_code).await?;
        info!("Renamed link '{}' -> '{}'", old_code, new_code);
        Ok(link)
    }

    /// Deletes a link from the durable store, then from the cache.
    pub async fn delete_link(&self, code: &str) -> Result<()> {
        if !self.repo.delete_link_and_stats(code).await? {
            return Err(LinkError::NotFound(code.to_string()));
        }
        self.unregister_link(code);
        info!("Deleted link '{}'", code);
        Ok(())
    }

    /// Returns a link with its durable statistics.
    ///
    /// An expired link is purged and reported as `Expired`.
    pub async fn link_stats(&self, code: &str) -> Result<(DurableLink, DurableStats)> {
        let Some(link) = self.repo.find_link_by_code(code).await? else {
            return Err(LinkError::NotFound(code.to_string()));
        };

        if link.is_expired_at(Utc::now()) {
            self.purge(code).await?;
            return Err(LinkError::Expired(code.to_string()));
        }

        let stats = self
            .repo
            .find_stats_by_code(code)
            .await?
            .ok_or_else(|| LinkError::NotFound(format!("statistics for {}", code)))?;
        Ok((link, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryLinkStore;
    use async_trait::async_trait;
    use chrono::Duration;

    fn service_with(max_size: usize) -> (LinkService, Arc<MemoryLinkStore>) {
        let store = Arc::new(MemoryLinkStore::new());
        let service = LinkService::new(Arc::new(PopularityCache::new(max_size)), store.clone());
        (service, store)
    }

    async fn seed(
        store: &MemoryLinkStore,
        code: &str,
        url: &str,
        count: u64,
        expires_at: Option<DateTime<Utc>>,
    ) {
        store
            .insert_link(DurableLink::new(code, url).with_expiry(expires_at))
            .await
            .unwrap();
        store.upsert_stats(code, count, None).await.unwrap();
    }

    #[tokio::test]
    async fn resolve_unknown_code_is_not_found() {
        let (service, _) = service_with(10);

        let err = service.resolve_short_code("nope").await.unwrap_err();
        assert_eq!(err, LinkError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn cache_miss_falls_back_and_populates_cache() {
        let (service, store) = service_with(10);
        seed(&store, "abc", "https://example.com", 4, None).await;

        let url = service.resolve_short_code("abc").await.unwrap();

        assert_eq!(url, "https://example.com");
        assert_eq!(service.cache().get("abc"), Some("https://example.com".to_string()));
        assert_eq!(service.cache().access_count("abc"), Some(5));
        let stats = store.find_stats_by_code("abc").await.unwrap().unwrap();
        assert_eq!(stats.access_count, 5);
        assert!(stats.last_access.is_some());
    }

    #[tokio::test]
    async fn cache_hit_bumps_both_counters() {
        let (service, store) = service_with(10);
        seed(&store, "abc", "https://example.com", 0, None).await;
        service.register_link("abc", "https://example.com", 0, None);

        service.resolve_short_code("abc").await.unwrap();
        service.resolve_short_code("abc").await.unwrap();

        assert_eq!(service.cache().access_count("abc"), Some(2));
        let stats = store.find_stats_by_code("abc").await.unwrap().unwrap();
        assert_eq!(stats.access_count, 2);
    }

    #[tokio::test]
    async fn expired_link_is_purged_on_read() {
        let (service, store) = service_with(10);
        let past = Utc::now() - Duration::minutes(5);
        seed(&store, "old", "https://example.com", 3, Some(past)).await;

        let err = service.resolve_short_code("old").await.unwrap_err();

        assert_eq!(err, LinkError::Expired("old".to_string()));
        assert!(store.find_link_by_code("old").await.unwrap().is_none());
        assert!(store.find_stats_by_code("old").await.unwrap().is_none());
        assert!(!service.cache().contains("old"));
    }

    #[tokio::test]
    async fn expired_cached_entry_is_purged_on_hit() {
        let (service, store) = service_with(10);
        let past = Utc::now() - Duration::minutes(5);
        seed(&store, "old", "https://example.com", 3, Some(past)).await;
        service.register_link("old", "https://example.com", 3, Some(past));

        let err = service.resolve_short_code("old").await.unwrap_err();

        assert_eq!(err, LinkError::Expired("old".to_string()));
        assert!(!service.cache().contains("old"));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn stale_cache_entry_without_durable_link_is_dropped() {
        let (service, _) = service_with(10);
        service.register_link("ghost", "https://example.com", 2, None);

        let err = service.resolve_short_code("ghost").await.unwrap_err();

        assert_eq!(err, LinkError::NotFound("ghost".to_string()));
        assert!(!service.cache().contains("ghost"));
    }

    #[tokio::test]
    async fn missing_durable_stats_are_seeded_from_cache() {
        let (service, store) = service_with(10);
        store
            .insert_link(DurableLink::new("abc", "https://example.com"))
            .await
            .unwrap();
        service.register_link("abc", "https://example.com", 6, None);

        let url = service.resolve_short_code("abc").await.unwrap();

        assert_eq!(url, "https://example.com");
        let stats = store.find_stats_by_code("abc").await.unwrap().unwrap();
        assert_eq!(stats.access_count, 7);
        assert_eq!(service.cache().access_count("abc"), Some(7));
    }

    #[tokio::test]
    async fn rename_preserves_popularity() {
        let (service, store) = service_with(10);
        seed(&store, "old", "https://example.com", 7, None).await;
        service.register_link("old", "https://example.com", 7, None);

        store.rename_link("old", "new").await.unwrap();
        service.rename_link("old", "new").await.unwrap();

        assert!(!service.cache().contains("old"));
        assert_eq!(service.cache().access_count("new"), Some(7));

        service.resolve_short_code("new").await.unwrap();
        assert!(service.cache().access_count("new").unwrap() >= 7);
    }

    #[tokio::test]
    async fn rename_keeps_cached_count_when_ahead_of_durable() {
        let (service, store) = service_with(10);
        seed(&store, "old", "https://example.com", 0, None).await;
        service.register_link("old", "https://example.com", 7, None);

        service.change_short_code("old", "new").await.unwrap();

        assert_eq!(service.cache().access_count("new"), Some(7));
    }

    #[tokio::test]
    async fn rename_onto_taken_code_conflicts_and_leaves_cache() {
        let (service, store) = service_with(10);
        seed(&store, "a", "https://a.example", 1, None).await;
        seed(&store, "b", "https://b.example", 1, None).await;
        service.register_link("a", "https://a.example", 1, None);

        let err = service.change_short_code("a", "b").await.unwrap_err();

        assert!(matches!(err, LinkError::Conflict(_)));
        assert!(service.cache().contains("a"));
    }

    #[tokio::test]
    async fn sweep_purges_expired_links_from_both_stores() {
        let (service, store) = service_with(10);
        let past = Utc::now() - Duration::minutes(1);
        let future = Utc::now() + Duration::hours(1);
        seed(&store, "gone1", "https://a.example", 0, Some(past)).await;
        seed(&store, "gone2", "https://b.example", 0, Some(past)).await;
        seed(&store, "live", "https://c.example", 0, Some(future)).await;
        service.register_link("gone1", "https://a.example", 0, Some(past));
        service.register_link("live", "https://c.example", 0, Some(future));

        let deleted = service.run_expiration_sweep().await.unwrap();

        assert_eq!(deleted, 2);
        assert!(!service.cache().contains("gone1"));
        assert!(store.find_link_by_code("gone1").await.unwrap().is_none());
        assert!(store.find_link_by_code("gone2").await.unwrap().is_none());
        assert!(store.find_stats_by_code("gone1").await.unwrap().is_none());
        assert!(service.cache().contains("live"));
        assert_eq!(store.len().await, 1);
    }

    /// Store that refuses to delete one specific code.
    struct FlakyStore {
        inner: MemoryLinkStore,
        broken: String,
        failure: LinkError,
    }

    #[async_trait]
    impl LinkRepository for FlakyStore {
        async fn find_link_by_code(&self, code: &str) -> Result<Option<DurableLink>> {
            self.inner.find_link_by_code(code).await
        }

        async fn find_expired_links(&self, now: DateTime<Utc>) -> Result<Vec<DurableLink>> {
            self.inner.find_expired_links(now).await
        }

        async fn find_stats_by_code(&self, code: &str) -> Result<Option<DurableStats>> {
            self.inner.find_stats_by_code(code).await
        }

        async fn upsert_stats(
            &self,
            code: &str,
            access_count: u64,
            last_access: Option<DateTime<Utc>>,
        ) -> Result<()> {
            self.inner.upsert_stats(code, access_count, last_access).await
        }

        async fn increment_stats(
            &self,
            code: &str,
            at: DateTime<Utc>,
        ) -> Result<Option<DurableStats>> {
            self.inner.increment_stats(code, at).await
        }

        async fn insert_link(&self, link: DurableLink) -> Result<()> {
            self.inner.insert_link(link).await
        }

        async fn rename_link(&self, old_code: &str, new_code: &str) -> Result<DurableLink> {
            self.inner.rename_link(old_code, new_code).await
        }

        async fn delete_link_and_stats(&self, code: &str) -> Result<bool> {
            if code == self.broken {
                return Err(self.failure.clone());
            }
            self.inner.delete_link_and_stats(code).await
        }
    }

    #[tokio::test]
    async fn sweep_continues_past_failed_entry() {
        let past = Utc::now() - Duration::minutes(1);
        let inner = MemoryLinkStore::new();
        seed(&inner, "a", "https://a.example", 0, Some(past)).await;
        seed(&inner, "b", "https://b.example", 0, Some(past)).await;
        seed(&inner, "c", "https://c.example", 0, Some(past)).await;
        let store = Arc::new(FlakyStore {
            inner,
            broken: "b".to_string(),
            failure: LinkError::Storage("transaction aborted".to_string()),
        });
        let service = LinkService::new(Arc::new(PopularityCache::new(10)), store.clone());

        let deleted = service.run_expiration_sweep().await.unwrap();

        assert_eq!(deleted, 2);
        assert!(store.inner.find_link_by_code("a").await.unwrap().is_none());
        assert!(store.inner.find_link_by_code("b").await.unwrap().is_some());
        assert!(store.inner.find_link_by_code("c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sweep_skips_entry_with_non_fatal_error() {
        let past = Utc::now() - Duration::minutes(1);
        let inner = MemoryLinkStore::new();
        seed(&inner, "a", "https://a.example", 0, Some(past)).await;
        seed(&inner, "b", "https://b.example", 0, Some(past)).await;
        let store = Arc::new(FlakyStore {
            inner,
            broken: "a".to_string(),
            failure: LinkError::NotFound("a".to_string()),
        });
        let service = LinkService::new(Arc::new(PopularityCache::new(10)), store.clone());
        service.register_link("a", "https://a.example", 0, Some(past));

        let deleted = service.run_expiration_sweep().await.unwrap();

        assert_eq!(deleted, 1);
        assert!(!service.cache().contains("a"));
        assert!(store.inner.find_link_by_code("b").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn resolve_survives_concurrent_cache_removal() {
        const ROUNDS: usize = 200;

        let (service, store) = service_with(10);
        seed(&store, "abc", "https://example.com", 0, None).await;
        service.register_link("abc", "https://example.com", 0, None);

        let remover = {
            let service = service.clone();
            tokio::spawn(async move {
                for _ in 0..ROUNDS {
                    service.unregister_link("abc");
                    tokio::task::yield_now().await;
                }
            })
        };
        let resolvers: Vec<_> = (0..ROUNDS)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.resolve_short_code("abc").await })
            })
            .collect();

        for handle in resolvers {
            assert_eq!(handle.await.unwrap().unwrap(), "https://example.com");
        }
        remover.await.unwrap();

        // Every access reaches the durable counter, whichever path served it.
        let stats = store.find_stats_by_code("abc").await.unwrap().unwrap();
        assert_eq!(stats.access_count, ROUNDS as u64);
    }

    #[tokio::test]
    async fn cache_size_check_evicts_least_popular() {
        let (service, _) = service_with(4);
        service.register_link("a", "https://a.example", 5, None);
        service.register_link("b", "https://b.example", 1, None);
        service.register_link("c", "https://c.example", 9, None);
        service.register_link("d", "https://d.example", 2, None);
        assert_eq!(service.run_cache_size_check(), 0);

        service.register_link("e", "https://e.example", 7, None);

        assert_eq!(service.cache().size(), 4);
        assert!(!service.cache().contains("b"));
    }

    #[tokio::test]
    async fn create_link_with_alias_and_conflict() {
        let (service, store) = service_with(10);

        let link = service
            .create_link("https://example.com", Some("my-alias"), None)
            .await
            .unwrap();

        assert_eq!(link.short_code, "my-alias");
        assert_eq!(service.cache().access_count("my-alias"), Some(0));
        let stats = store.find_stats_by_code("my-alias").await.unwrap().unwrap();
        assert_eq!(stats.access_count, 0);

        let err = service
            .create_link("https://other.com", Some("my-alias"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::Conflict(_)));
    }

    #[tokio::test]
    async fn create_link_generates_code() {
        let (service, _) = service_with(10);

        let link = service
            .create_link("https://example.com", None, None)
            .await
            .unwrap();

        assert_eq!(link.short_code.len(), crate::service::GENERATED_CODE_LENGTH);
        assert_eq!(
            service.resolve_short_code(&link.short_code).await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn create_link_rejects_past_expiry() {
        let (service, _) = service_with(10);

        let err = service
            .create_link(
                "https://example.com",
                None,
                Some(Utc::now() - Duration::seconds(1)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LinkError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn delete_link_clears_both_stores() {
        let (service, store) = service_with(10);
        service
            .create_link("https://example.com", Some("bye"), None)
            .await
            .unwrap();

        service.delete_link("bye").await.unwrap();

        assert!(!service.cache().contains("bye"));
        assert!(store.is_empty().await);
        assert!(matches!(
            service.delete_link("bye").await,
            Err(LinkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn link_stats_reports_durable_counter() {
        let (service, store) = service_with(10);
        seed(&store, "abc", "https://example.com", 0, None).await;

        service.resolve_short_code("abc").await.unwrap();
        service.resolve_short_code("abc").await.unwrap();
        let (link, stats) = service.link_stats("abc").await.unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(stats.access_count, 2);
    }

    #[tokio::test]
    async fn concurrent_resolves_count_every_access() {
        const CALLERS: usize = 32;

        let (service, store) = service_with(10);
        seed(&store, "abc", "https://example.com", 0, None).await;
        service.register_link("abc", "https://example.com", 0, None);

        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.resolve_short_code("abc").await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(service.cache().access_count("abc"), Some(CALLERS as u64));
        let stats = store.find_stats_by_code("abc").await.unwrap().unwrap();
        assert_eq!(stats.access_count, CALLERS as u64);
    }
}
