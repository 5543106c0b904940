//! Error types for the StashHaus crate
//!
//! This module contains all error types that can be returned by StashHaus operations.

use thiserror::Error;

use crate::transport::ClientError;

#[derive(Error, Debug)]
pub enum StashHausError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Client setup error: {0}")]
    Client(#[from] ClientError),

    #[error("Store error: {0}")]
    Store(#[from] entity_store::StoreError),
}

impl From<entity_store::ExecutorError> for StashHausError {
    fn from(err: entity_store::ExecutorError) -> Self {
        Self::Store(err.into())
    }
}
