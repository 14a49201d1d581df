//! Shared holder for the resolved build identifier.
//!
//! LiveScore rotates its Next.js build id on every deployment, and every data
//! request needs it as a path segment.  Discovery costs a homepage fetch, so
//! the first successful result is kept here and reused for the lifetime of
//! the cache.  There is no TTL: a stale id after a provider deployment stays
//! stale until the cache is cleared or the process restarts.
//!
//! The cell is replace-if-absent.  Two callers racing on a cold cache may both
//! run discovery, but only the first stored token is kept and both observe it.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::BuildId;

/// Thread-safe, cloneable single-value cell for the build id.
#[derive(Clone, Default)]
pub struct BuildIdCache {
    inner: Arc<RwLock<Option<BuildId>>>,
}

impl BuildIdCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-seeded with a known build id (skips discovery entirely).
    pub fn seeded(build_id: BuildId) -> Self {
        BuildIdCache {
            inner: Arc::new(RwLock::new(Some(build_id))),
        }
    }

    /// The cached build id, if one has been resolved.
    pub async fn get(&self) -> Option<BuildId> {
        self.inner.read().await.clone()
    }

    /// Store `build_id` unless a value is already present.
    /// Returns whichever value ends up cached.
    pub async fn get_or_insert(&self, build_id: BuildId) -> BuildId {
        let mut slot = self.inner.write().await;
        match slot.as_ref() {
            Some(existing) => {
                if existing != &build_id {
                    debug!(
                        "BuildIdCache: keeping {} (concurrent resolve found {})",
                        existing, build_id
                    );
                }
                existing.clone()
            }
            None => {
                debug!("BuildIdCache: stored {}", build_id);
                *slot = Some(build_id.clone());
                build_id
            }
        }
    }

    /// Forget the cached value so the next resolve hits the network again.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_cache_returns_none() {
        let cache = BuildIdCache::new();
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_first_insert_wins() {
        let cache = BuildIdCache::new();
        let stored = cache.get_or_insert(BuildId::new("abc123")).await;
        assert_eq!(stored.as_str(), "abc123");

        let second = cache.get_or_insert(BuildId::new("zzz999")).await;
        assert_eq!(second.as_str(), "abc123", "existing value must be kept");
        assert_eq!(cache.get().await, Some(BuildId::new("abc123")));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let cache = BuildIdCache::new();
        let other = cache.clone();
        cache.get_or_insert(BuildId::new("shared")).await;
        assert_eq!(other.get().await, Some(BuildId::new("shared")));
    }

    #[tokio::test]
    async fn test_seeded_and_clear() {
        let cache = BuildIdCache::seeded(BuildId::new("seed"));
        assert_eq!(cache.get().await, Some(BuildId::new("seed")));

        cache.clear().await;
        assert_eq!(cache.get().await, None);
    }
}
