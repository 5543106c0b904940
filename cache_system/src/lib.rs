//! Cache system for identity-mapped entity caching
//!
//! This crate provides the in-memory table that keeps one representative per
//! `(type_name, id)` pair, with per-type expiration and inspection utilities.

pub mod entry;
pub mod expiration;
pub mod manager;
pub mod prelude;

// Re-export centralized config
pub use config::CacheConfig;

pub use entry::{CacheEntry, CacheKey};
pub use expiration::ExpirationPolicy;
pub use manager::{CacheManager, CacheStats};
