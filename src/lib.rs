//! # StashHaus
//!
//! An identity-mapped, field-aware entity store for the Stash GraphQL API.
//! Records are fetched once, cached per `(type, id)` with a per-type expiration,
//! and enriched on demand with only the fields a caller is missing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stashhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig {
//!         client: ClientConfig::new("http://localhost:9999/graphql".to_string(), 30),
//!         ..AppConfig::default()
//!     };
//!     let stash = StashHaus::new(config)?;
//!     let store = stash.store();
//!
//!     // Point lookup, answered from the cache on the second call
//!     if let Some(scene) = store.get::<Scene>("42", None).await {
//!         println!("{:?}", scene.title);
//!     }
//!
//!     // Bounded search
//!     let favorites = store
//!         .find::<Performer>(&Filters::new().with("favorite", true))
//!         .await?;
//!
//!     // Fetch only what is missing, then resolve the related scenes
//!     for performer in favorites {
//!         let performer = store.populate(performer, Some(&["scenes"]), false).await;
//!         println!("{} has {} scenes", performer.name, performer.scenes.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod models;
pub mod prelude;
pub mod transport;

// Re-export the main public types for convenience
pub use core::StashHaus;
pub use errors::StashHausError;
pub use transport::GraphqlClient;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, ClientConfig, SearchConfig};

// Re-export internal crates used by macros and public API
// These MUST be public for the generated macro code to work correctly
pub use cache_system;
pub use entity_derive;
pub use entity_store;

// Re-export external dependencies used in public API
pub use async_trait;
