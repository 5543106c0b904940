//! Core StashHaus functionality
//!
//! This module contains the main StashHaus struct, which wires configuration,
//! the GraphQL transport and the entity store together.

use serde_json::{Value, json};
use std::sync::Arc;

use config::AppConfig;
use entity_store::{EntityStore, Executor, StoreError};

use crate::errors::StashHausError;
use crate::transport::GraphqlClient;

const VERSION_QUERY: &str = "query Version { version { version } }";

/// Main StashHaus coordinator that owns the transport and the entity store
pub struct StashHaus {
    config: AppConfig,
    executor: Arc<dyn Executor>,
    store: EntityStore,
}

impl std::fmt::Debug for StashHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StashHaus")
            .field("endpoint", &self.config.client.endpoint)
            .field("store", &self.store)
            .finish()
    }
}

impl StashHaus {
    /// Create a StashHaus talking to the configured GraphQL endpoint
    pub fn new(config: AppConfig) -> Result<Self, StashHausError> {
        config.validate()?;
        let client = GraphqlClient::new(&config.client)?;
        Ok(Self::with_executor(Arc::new(client), config))
    }

    /// Create a StashHaus from `stashhaus.toml` / `.env`
    pub fn from_env() -> Result<Self, StashHausError> {
        Self::new(AppConfig::load()?)
    }

    /// Create a StashHaus over any executor (tests, alternative transports)
    pub fn with_executor(executor: Arc<dyn Executor>, config: AppConfig) -> Self {
        let store = EntityStore::from_config(executor.clone(), &config.cache, &config.search);
        tracing::info!(
            endpoint = %config.client.endpoint,
            default_ttl = ?config.cache.default_ttl(),
            "entity store ready"
        );

        Self {
            config,
            executor,
            store,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Version string reported by the server
    pub async fn server_version(&self) -> Result<String, StashHausError> {
        let data = self.executor.execute(VERSION_QUERY, json!({})).await?;
        data.pointer("/version/version")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                StoreError::MalformedResponse {
                    type_name: "Version",
                    reason: "reply has no version string".to_string(),
                }
                .into()
            })
    }

    /// Check that the server answers queries
    pub async fn health_check(&self) -> Result<(), StashHausError> {
        self.server_version().await.map(|_| ())
    }
}
