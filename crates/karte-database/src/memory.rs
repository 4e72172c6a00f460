//! In-memory link store.
//!
//! Used by the service and router tests, and usable as an embedded store
//! when no PostgreSQL instance is configured. Shard locks in [`DashMap`]
//! give the same per-key atomicity the Postgres store gets from row locks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use karte_core::AppResult;
use karte_core::error::AppError;
use karte_entity::ReportLink;

use crate::store::LinkStore;

/// Link store backed by a concurrent hash map.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, ReportLink>,
}

impl MemoryLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of links currently held.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn put(&self, link: &ReportLink) -> AppResult<()> {
        match self.links.entry(link.token.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Link token already exists")),
            Entry::Vacant(entry) => {
                entry.insert(link.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, token: &str) -> AppResult<Option<ReportLink>> {
        Ok(self.links.get(token).map(|entry| entry.value().clone()))
    }

    async fn set_used(&self, token: &str) -> AppResult<bool> {
        // get_mut holds the shard write lock for the whole check-and-set.
        match self.links.get_mut(token) {
            Some(mut entry) if !entry.used => {
                entry.used = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        Ok(self.links.remove(token).is_some())
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.links.retain(|_, link| {
            let keep = link.expires_at > cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }

    async fn list_by_resource(
        &self,
        resource: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ReportLink>> {
        let mut links: Vec<ReportLink> = self
            .links
            .iter()
            .filter(|entry| entry.resource == resource && !entry.is_expired(now))
            .map(|entry| entry.value().clone())
            .collect();
        links.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use karte_core::error::ErrorKind;

    use super::*;

    fn link(token: &str, resource: &str, now: DateTime<Utc>, ttl_hours: i64) -> ReportLink {
        ReportLink {
            token: token.to_string(),
            resource: resource.to_string(),
            issued_at: now,
            expires_at: now + Duration::hours(ttl_hours),
            used: false,
        }
    }

    #[tokio::test]
    async fn test_put_rejects_duplicate_token() {
        let store = MemoryLinkStore::new();
        let now = Utc::now();
        store.put(&link("t1", "r1", now, 1)).await.unwrap();

        let err = store.put(&link("t1", "r2", now, 1)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        // The original grant is untouched.
        let kept = store.get("t1").await.unwrap().unwrap();
        assert_eq!(kept.resource, "r1");
    }

    #[tokio::test]
    async fn test_set_used_is_one_way() {
        let store = MemoryLinkStore::new();
        store.put(&link("t1", "r1", Utc::now(), 1)).await.unwrap();

        assert!(store.set_used("t1").await.unwrap());
        assert!(!store.set_used("t1").await.unwrap());
        assert!(!store.set_used("missing").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_set_used_has_exactly_one_winner() {
        let store = Arc::new(MemoryLinkStore::new());
        store.put(&link("t1", "r1", Utc::now(), 1)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.set_used("t1").await.unwrap() },
            ));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[tokio::test]
    async fn test_delete_expired_respects_cutoff() {
        let store = MemoryLinkStore::new();
        let now = Utc::now();
        store.put(&link("live", "r1", now, 2)).await.unwrap();
        // Expires exactly at the cutoff: must be removed.
        store
            .put(&ReportLink {
                expires_at: now,
                ..link("boundary", "r1", now - Duration::hours(1), 1)
            })
            .await
            .unwrap();
        store
            .put(&link("dead", "r1", now - Duration::hours(3), 1))
            .await
            .unwrap();

        assert_eq!(store.delete_expired(now).await.unwrap(), 2);
        assert_eq!(store.len(), 1);
        assert!(store.get("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_by_resource_orders_newest_first() {
        let store = MemoryLinkStore::new();
        let now = Utc::now();
        store
            .put(&link("old", "r1", now - Duration::minutes(10), 24))
            .await
            .unwrap();
        store.put(&link("new", "r1", now, 24)).await.unwrap();
        store.put(&link("other", "r2", now, 24)).await.unwrap();
        store
            .put(&link("expired", "r1", now - Duration::hours(2), 1))
            .await
            .unwrap();

        let links = store.list_by_resource("r1", now).await.unwrap();
        let tokens: Vec<&str> = links.iter().map(|l| l.token.as_str()).collect();
        assert_eq!(tokens, vec!["new", "old"]);
    }
}
