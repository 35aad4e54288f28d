use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{LinkError, Result};
use crate::storage::{DurableLink, DurableStats, LinkRepository};

#[derive(Debug, Default)]
struct Tables {
    links: HashMap<String, DurableLink>,
    stats: HashMap<String, DurableStats>,
}

/// In-memory implementation of [`LinkRepository`].
///
/// Both tables sit behind one lock, so each trait call observes and commits
/// a consistent state.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    tables: RwLock<Tables>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links, expired ones included.
    pub async fn len(&self) -> usize {
        self.tables.read().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkStore {
    async fn find_link_by_code(&self, code: &str) -> Result<Option<DurableLink>> {
        Ok(self.tables.read().await.links.get(code).cloned())
    }

    async fn find_expired_links(&self, now: DateTime<Utc>) -> Result<Vec<DurableLink>> {
        let tables = self.tables.read().await;
        let mut expired: Vec<DurableLink> = tables
            .links
            .values()
            .filter(|link| link.is_expired_at(now))
            .cloned()
            .collect();
        expired.sort_by(|a, b| a.short_code.cmp(&b.short_code));
        Ok(expired)
    }

    async fn find_stats_by_code(&self, code: &str) -> Result<Option<DurableStats>> {
        Ok(self.tables.read().await.stats.get(code).cloned())
    }

    async fn upsert_stats(
        &self,
        code: &str,
        access_count: u64,
        last_access: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.links.contains_key(code) {
            return Err(LinkError::NotFound(code.to_string()));
        }

        tables.stats.insert(
            code.to_string(),
            DurableStats {
                short_code: code.to_string(),
                access_count,
                last_access,
            },
        );
        Ok(())
    }

    async fn increment_stats(
        &self,
        code: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<DurableStats>> {
        let mut tables = self.tables.write().await;
        let Some(stats) = tables.stats.get_mut(code) else {
            return Ok(None);
        };

        stats.access_count += 1;
        stats.last_access = Some(at);
        Ok(Some(stats.clone()))
    }

    async fn insert_link(&self, link: DurableLink) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.links.contains_key(&link.short_code) {
            return Err(LinkError::Conflict(link.short_code));
        }

        tables.links.insert(link.short_code.clone(), link);
        Ok(())
    }

    async fn rename_link(&self, old_code: &str, new_code: &str) -> Result<DurableLink> {
        let mut tables = self.tables.write().await;
        if !tables.links.contains_key(old_code) {
            return Err(LinkError::NotFound(old_code.to_string()));
        }
        if tables.links.contains_key(new_code) {
            return Err(LinkError::Conflict(new_code.to_string()));
        }

        let mut link = tables
            .links
            .remove(old_code)
            .ok_or_else(|| LinkError::NotFound(old_code.to_string()))?;
        link.short_code = new_code.to_string();
        tables.links.insert(new_code.to_string(), link.clone());

        if let Some(mut stats) = tables.stats.remove(old_code) {
            stats.short_code = new_code.to_string();
            tables.stats.insert(new_code.to_string(), stats);
        }

        Ok(link)
    }

    async fn delete_link_and_stats(&self, code: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        tables.stats.remove(code);
        Ok(tables.links.remove(code).is_some())
    }
}
