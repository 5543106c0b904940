//! Entity Store - identity-mapped, field-aware record cache for a GraphQL catalog
//!
//! This crate provides the `Tracked` record wrapper, the `Entity` metadata trait,
//! filter translation, query document construction and the `EntityStore`
//! orchestrator that sits between application code and an `Executor`.

// Generated code refers to `entity_store::...`, including inside this crate
extern crate self as entity_store;

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod errors;
pub mod prelude;
pub mod query;
pub mod store;
pub mod tracked;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache_system::{CacheManager, CacheStats, ExpirationPolicy};
pub use errors::{ExecutorError, StoreError};
pub use query::{FindFilter, FindResult, Filters, SortDirection};
pub use store::{EntityStore, StoreOptions};
pub use tracked::{FieldSet, Tracked};
pub use traits::*;

// Used by `#[derive(Entity)]` output
pub use async_trait::async_trait;
pub use entity_derive::{record, Entity};
#[doc(hidden)]
pub use tracing;
