//! Traits for remote records
//!
//! This module contains the traits that connect model types and transports to
//! the entity store.

pub mod entity;
pub mod executor;
pub mod related;

pub use entity::Entity;
pub use executor::Executor;
pub use related::Related;
