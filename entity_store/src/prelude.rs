//! Convenience re-exports for common entity-store usage

// Core traits
pub use crate::traits::{Entity, Executor, Related};

// Error types
pub use crate::errors::{ExecutorError, StoreError};

// Records and the store
pub use crate::store::{EntityStore, StoreOptions};
pub use crate::tracked::{FieldSet, Tracked};

// Query building
pub use crate::query::{Filters, FindResult, SortDirection};

// Cache inspection (re-exported from cache_system)
pub use cache_system::CacheStats;

// Macros
pub use entity_derive::record;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
