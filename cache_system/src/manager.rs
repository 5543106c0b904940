//! Cache manager implementation
//!
//! This module provides the main CacheManager struct: the identity-mapped
//! table of records keyed by `(type_name, id)`.
//!
//! Every operation takes the table lock for its own synchronous span only and
//! never across an `.await`, so async callers can share one manager freely.

use crate::entry::{CacheEntry, CacheKey};
use crate::expiration::ExpirationPolicy;
use config::CacheConfig;
use serde::Serialize;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Snapshot of the table contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, expired ones included
    pub total: usize,
    /// Entries per type name
    pub by_type: BTreeMap<String, usize>,
    /// Entries past their expiration that no read has evicted yet
    pub expired: usize,
}

/// In-memory identity map
pub struct CacheManager {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    policy: RwLock<ExpirationPolicy>,
}

impl Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("entries", &self.len())
            .field("policy", &*self.read_policy())
            .finish()
    }
}

impl CacheManager {
    /// Create a new cache manager
    pub fn new(policy: ExpirationPolicy) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            policy: RwLock::new(policy),
        }
    }

    /// Create a cache manager from configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(ExpirationPolicy::from_config(config))
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_policy(&self) -> RwLockReadGuard<'_, ExpirationPolicy> {
        self.policy.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_policy(&self) -> RwLockWriteGuard<'_, ExpirationPolicy> {
        self.policy.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read path: a live entry is returned, an expired one is evicted
    pub fn get<V>(&self, key: &CacheKey) -> Option<V>
    where
        V: Any + Clone,
    {
        {
            let entries = self.read_entries();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired() => return entry.downcast_ref::<V>().cloned(),
                Some(_) => {}
            }
        }

        let mut entries = self.write_entries();
        // Another caller may have refreshed the entry between the two locks
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                #[cfg(feature = "debug-logging")]
                tracing::trace!(key = %key, "evicted expired cache entry");
                None
            }
            Some(entry) => entry.downcast_ref::<V>().cloned(),
            None => None,
        }
    }

    /// Whether a live entry exists for `key`
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.read_entries()
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Store `value`, replacing any previous entry for the key
    pub fn insert<V>(&self, key: CacheKey, value: V)
    where
        V: Any + Send + Sync,
    {
        let ttl = self.expiration_for(&key.type_name);
        #[cfg(feature = "debug-logging")]
        tracing::trace!(key = %key, ?ttl, "caching entry");
        self.write_entries().insert(key, CacheEntry::new(value, ttl));
    }

    /// Store `value`, combining it with the live entry for the key if there is one
    ///
    /// `merge` receives the cached value and the incoming one. The combined value
    /// replaces the entry (with a fresh capture time) and a copy is returned.
    pub fn upsert<V, F>(&self, key: CacheKey, value: V, merge: F) -> V
    where
        V: Any + Clone + Send + Sync,
        F: FnOnce(&V, V) -> V,
    {
        let ttl = self.expiration_for(&key.type_name);
        let mut entries = self.write_entries();

        let existing = entries
            .get(&key)
            .filter(|entry| !entry.is_expired())
            .and_then(|entry| entry.downcast_ref::<V>());

        let stored = match existing {
            Some(current) => merge(current, value),
            None => value,
        };

        entries.insert(key, CacheEntry::new(stored.clone(), ttl));
        stored
    }

    /// Remove one entry
    pub fn remove(&self, key: &CacheKey) -> bool {
        self.write_entries().remove(key).is_some()
    }

    /// Remove every entry of a type, returning how many were dropped
    pub fn remove_type(&self, type_name: &str) -> usize {
        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|key, _| key.type_name != type_name);
        before - entries.len()
    }

    /// Remove everything
    pub fn clear(&self) -> usize {
        let mut entries = self.write_entries();
        let dropped = entries.len();
        entries.clear();
        dropped
    }

    /// Live values of one type. Expired entries are skipped, not evicted.
    pub fn values<V>(&self, type_name: &str) -> Vec<V>
    where
        V: Any + Clone,
    {
        self.read_entries()
            .iter()
            .filter(|(key, entry)| key.type_name == type_name && !entry.is_expired())
            .filter_map(|(_, entry)| entry.downcast_ref::<V>().cloned())
            .collect()
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.read_entries();
        let mut stats = CacheStats {
            total: entries.len(),
            ..CacheStats::default()
        };

        for (key, entry) in entries.iter() {
            *stats.by_type.entry(key.type_name.clone()).or_insert(0) += 1;
            if entry.is_expired() {
                stats.expired += 1;
            }
        }

        stats
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Expiration that an entry of `type_name` inserted now would get
    pub fn expiration_for(&self, type_name: &str) -> Option<Duration> {
        self.read_policy().ttl_for(type_name)
    }

    /// Override the expiration of one type. Existing entries keep theirs.
    pub fn set_expiration(&self, type_name: &str, ttl: Option<Duration>) {
        self.write_policy().set(type_name, ttl);
    }

    /// Change the store-wide default. Existing entries keep theirs.
    pub fn set_default_expiration(&self, ttl: Option<Duration>) {
        self.write_policy().set_default(ttl);
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new(ExpirationPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(type_name: &str, id: &str) -> CacheKey {
        CacheKey::new(type_name, id)
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_evicts_expired_entry() {
        let cache = CacheManager::default();
        cache.set_expiration("Scene", Some(Duration::from_secs(10)));
        cache.insert(key("Scene", "1"), "first".to_string());

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(cache.get::<String>(&key("Scene", "1")).as_deref(), Some("first"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.stats().expired, 1);
        assert_eq!(cache.get::<String>(&key("Scene", "1")), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_without_eviction() {
        let cache = CacheManager::new(ExpirationPolicy::new(Some(Duration::from_secs(5))));
        cache.insert(key("Tag", "1"), 1_u32);
        cache.set_expiration("Tag", None);
        cache.insert(key("Tag", "2"), 2_u32);

        tokio::time::advance(Duration::from_secs(6)).await;

        assert_eq!(cache.values::<u32>("Tag"), vec![2]);
        assert!(!cache.contains(&key("Tag", "1")));
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.stats(),
            CacheStats {
                total: 2,
                by_type: BTreeMap::from([("Tag".to_string(), 2)]),
                expired: 1,
            }
        );
    }

    #[test]
    fn test_upsert_merges_with_live_entry() {
        let cache = CacheManager::default();
        let merge = |old: &Vec<&'static str>, new: Vec<&'static str>| {
            let mut merged = old.clone();
            merged.extend(new);
            merged
        };

        let first = cache.upsert(key("Performer", "3"), vec!["id", "name"], merge);
        assert_eq!(first, vec!["id", "name"]);

        let second = cache.upsert(key("Performer", "3"), vec!["scenes"], merge);
        assert_eq!(second, vec!["id", "name", "scenes"]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_type_keeps_other_types() {
        let cache = CacheManager::default();
        for id in ["1", "2", "3"] {
            cache.insert(key("Scene", id), id.to_string());
        }
        cache.insert(key("Performer", "1"), "a".to_string());
        cache.insert(key("Performer", "2"), "b".to_string());

        assert_eq!(cache.remove_type("Scene"), 3);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().by_type.get("Performer"), Some(&2));
        assert!(cache.remove(&key("Performer", "1")));
        assert!(!cache.remove(&key("Performer", "1")));
        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_type_mismatch_reads_as_miss() {
        let cache = CacheManager::default();
        cache.insert(key("Studio", "1"), 5_i64);
        assert_eq!(cache.get::<String>(&key("Studio", "1")), None);
        assert_eq!(cache.get::<i64>(&key("Studio", "1")), Some(5));
    }
}
