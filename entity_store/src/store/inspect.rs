use super::EntityStore;
use crate::tracked::Tracked;
use crate::traits::Entity;
use cache_system::CacheStats;
use std::time::Duration;

impl EntityStore {
    /// Drop one cached record
    pub fn invalidate<T: Entity>(&self, id: &str) -> bool {
        let removed = self.cache.remove(&Self::key::<T>(id));
        crate::debug_log!(type_name = T::TYPE_NAME, id, removed, "invalidated record");
        removed
    }

    /// Drop every cached record of `T`
    pub fn invalidate_type<T: Entity>(&self) -> usize {
        let removed = self.cache.remove_type(T::TYPE_NAME);
        crate::debug_log!(type_name = T::TYPE_NAME, removed, "invalidated type");
        removed
    }

    pub fn invalidate_all(&self) -> usize {
        let removed = self.cache.clear();
        crate::debug_log!(removed, "invalidated cache");
        removed
    }

    /// Cached records of `T` matching `predicate`; never touches the network
    pub fn filter<T, F>(&self, predicate: F) -> Vec<Tracked<T>>
    where
        T: Entity,
        F: Fn(&Tracked<T>) -> bool,
    {
        self.cache
            .values::<Tracked<T>>(T::TYPE_NAME)
            .into_iter()
            .filter(|record| predicate(record))
            .collect()
    }

    pub fn all_cached<T: Entity>(&self) -> Vec<Tracked<T>> {
        self.cache.values::<Tracked<T>>(T::TYPE_NAME)
    }

    pub fn is_cached<T: Entity>(&self, id: &str) -> bool {
        self.cache.contains(&Self::key::<T>(id))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Expiration for records of `T` cached from now on; `None` never expires
    pub fn set_expiration<T: Entity>(&self, ttl: Option<Duration>) {
        self.cache.set_expiration(T::TYPE_NAME, ttl);
    }

    pub fn set_default_expiration(&self, ttl: Option<Duration>) {
        self.cache.set_default_expiration(ttl);
    }

    pub fn expiration_for<T: Entity>(&self) -> Option<Duration> {
        self.cache.expiration_for(T::TYPE_NAME)
    }
}
