//! Cache entries and keys
//!
//! A [`CacheEntry`] wraps one fetched record together with the instant it was
//! captured and how long it stays fresh. Entries are never mutated in place:
//! a refresh replaces the whole entry.

use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Composite key of the identity map
///
/// The type name disambiguates identical ids across entity kinds
/// (scene `12` and performer `12` are different records).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CacheKey {
    pub type_name: String,
    pub id: String,
}

impl CacheKey {
    pub fn new(type_name: &str, id: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            id: id.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.id)
    }
}

/// One cached record
#[derive(Clone)]
pub struct CacheEntry {
    entity: Arc<dyn Any + Send + Sync>,
    captured_at: Instant,
    expires_after: Option<Duration>,
}

impl fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("captured_at", &self.captured_at)
            .field("expires_after", &self.expires_after)
            .field("expired", &self.is_expired())
            .finish()
    }
}

impl CacheEntry {
    /// Capture `entity` now
    pub fn new<V>(entity: V, expires_after: Option<Duration>) -> Self
    where
        V: Any + Send + Sync,
    {
        Self {
            entity: Arc::new(entity),
            captured_at: Instant::now(),
            expires_after,
        }
    }

    /// True once the entry is older than its expiration. Entries without one never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_after {
            Some(ttl) => self.captured_at.elapsed() > ttl,
            None => false,
        }
    }

    pub fn captured_at(&self) -> Instant {
        self.captured_at
    }

    pub fn expires_after(&self) -> Option<Duration> {
        self.expires_after
    }

    /// Borrow the stored record as `V`, `None` if it holds another type
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.entity.downcast_ref::<V>()
    }
}
