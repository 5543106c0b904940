//! Convenience re-exports for common StashHaus usage
//!
//! This prelude module re-exports the most commonly used items from the StashHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use stashhaus::prelude::*;
//!
//! // Models, the store, filters and configuration are now in scope
//! let filters = Filters::new().with("rating100__gte", 80);
//! ```

// Core StashHaus components
pub use crate::core::StashHaus;
pub use crate::errors::StashHausError;
pub use crate::transport::{ClientError, GraphqlClient};

// Domain models
pub use crate::models::*;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, ClientConfig, SearchConfig};

// Re-export commonly used entity-store types for convenience
pub use entity_store::prelude::*;

// Re-export entity_store for macro-generated code
pub use entity_store;

// Common external dependencies
pub use async_trait;
pub use serde_json;
pub use tokio;
