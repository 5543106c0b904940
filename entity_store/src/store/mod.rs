//! The entity store
//!
//! [`EntityStore`] answers lookups and searches from the identity map when it
//! can and from the [`Executor`] when it must, keeping one representative per
//! `(type, id)` whose received fields only ever grow.

mod inspect;
mod lookup;
mod populate;
mod search;


use crate::tracked::Tracked;
use crate::traits::{Entity, Executor};
use cache_system::{CacheKey, CacheManager};
use config::{CacheConfig, SearchConfig};
use std::fmt::Debug;
use std::sync::Arc;

/// Search limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Largest match count `find` materializes
    pub max_find_results: usize,
    /// Page size of `find_iter`
    pub query_batch: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for StoreOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            max_find_results: config.max_find_results,
            query_batch: config.query_batch,
        }
    }
}

/// Identity-mapped, read-through store in front of a remote executor
#[derive(Clone)]
pub struct EntityStore {
    pub(crate) executor: Arc<dyn Executor>,
    pub(crate) cache: Arc<CacheManager>,
    pub(crate) options: StoreOptions,
}

impl Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("cache", &self.cache)
            .field("options", &self.options)
            .finish()
    }
}

impl EntityStore {
    /// Store with the default 30 minute expiration and default search limits
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self::with_cache(executor, Arc::new(CacheManager::default()), StoreOptions::default())
    }

    pub fn with_cache(
        executor: Arc<dyn Executor>,
        cache: Arc<CacheManager>,
        options: StoreOptions,
    ) -> Self {
        Self {
            executor,
            cache,
            options,
        }
    }

    pub fn from_config(
        executor: Arc<dyn Executor>,
        cache_config: &CacheConfig,
        search_config: &SearchConfig,
    ) -> Self {
        Self::with_cache(
            executor,
            Arc::new(CacheManager::from_config(cache_config)),
            StoreOptions::from(search_config),
        )
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub(crate) fn key<T: Entity>(id: &str) -> CacheKey {
        CacheKey::new(T::TYPE_NAME, id)
    }

    /// Cache a freshly received record, merging it into the live entry if any
    pub(crate) fn remember<T: Entity>(&self, record: Tracked<T>) -> Tracked<T> {
        let key = Self::key::<T>(record.id());
        self.cache
            .upsert(key, record, |cached: &Tracked<T>, fresh| merge_records(cached, fresh))
    }
}

/// `older` updated with `newer`; falls back to `newer` alone if the copies cannot be combined
pub(crate) fn merge_records<T: Entity>(older: &Tracked<T>, newer: Tracked<T>) -> Tracked<T> {
    match older.merged_with(&newer) {
        Ok(merged) => merged,
        Err(e) => {
            tracing::warn!(
                type_name = T::TYPE_NAME,
                id = newer.id(),
                error = %e,
                "could not merge record copies, keeping the newer one"
            );
            newer
        }
    }
}
