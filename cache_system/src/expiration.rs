//! Expiration policy
//!
//! This module defines the ExpirationPolicy struct
//! for configuring how long entries of each entity type stay fresh.

use config::CacheConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Default freshness window when nothing else is configured
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// Store-wide default plus per-type overrides
///
/// `None` means "never expires", both as the default and as an override.
#[derive(Debug, Clone)]
pub struct ExpirationPolicy {
    default_ttl: Option<Duration>,
    overrides: HashMap<String, Option<Duration>>,
}

impl ExpirationPolicy {
    pub fn new(default_ttl: Option<Duration>) -> Self {
        Self {
            default_ttl,
            overrides: HashMap::new(),
        }
    }

    /// Build the policy described by a cache configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        let mut policy = Self::new(config.default_ttl());
        for (type_name, ttl) in config.type_ttls() {
            policy.set(type_name, ttl);
        }
        policy
    }

    /// Expiration applied to entries of `type_name` inserted from now on
    pub fn ttl_for(&self, type_name: &str) -> Option<Duration> {
        match self.overrides.get(type_name) {
            Some(ttl) => *ttl,
            None => self.default_ttl,
        }
    }

    pub fn set(&mut self, type_name: &str, ttl: Option<Duration>) {
        self.overrides.insert(type_name.to_string(), ttl);
    }

    pub fn set_default(&mut self, ttl: Option<Duration>) {
        self.default_ttl = ttl;
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}

impl Default for ExpirationPolicy {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TTL))
    }
}
