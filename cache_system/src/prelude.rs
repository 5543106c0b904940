//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::entry::{CacheEntry, CacheKey};
pub use crate::expiration::ExpirationPolicy;
pub use crate::manager::{CacheManager, CacheStats};

// Re-export centralized config
pub use config::CacheConfig;
