//! # Configuration Management for StashHaus
//!
//! This crate provides centralized configuration structures for all StashHaus components,
//! including the GraphQL client, the entity cache and search limits.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{ClientConfig, CacheConfig, SearchConfig};
//!
//! // GraphQL endpoint of the Stash server
//! let client_config = ClientConfig::new("http://localhost:9999/graphql".to_string(), 30);
//!
//! // Entity cache: 30 minutes by default, scenes never expire
//! let cache_config = CacheConfig::new(1800).with_type_ttl("Scene", 0);
//!
//! // Search limits
//! let search_config = SearchConfig::new(1000, 40);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [client]
//! endpoint = "http://localhost:9999/graphql"
//! timeout_seconds = 30
//!
//! [cache]
//! default_ttl_seconds = 1800
//!
//! [cache.type_ttl_seconds]
//! Scene = 600
//! Tag = 0
//!
//! [search]
//! max_find_results = 1000
//! query_batch = 40
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from stashhaus.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./stashhaus.toml";
const CONFIG_PATH_VAR: &str = "STASHHAUS_CONFIG";
const ENDPOINT_VAR: &str = "STASHHAUS_ENDPOINT";
const API_KEY_VAR: &str = "STASHHAUS_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub client: ClientConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// GraphQL client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Sent as the `ApiKey` header when the server requires authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Entity cache configuration
///
/// A TTL of `0` means "never expires", both for the default and for per-type overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
    /// Overrides keyed by entity type name (`Scene`, `Performer`, ...)
    #[serde(default)]
    pub type_ttl_seconds: BTreeMap<String, u64>,
}

/// Search limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Largest match count `find()` will materialize in one go
    #[serde(default = "default_max_find_results")]
    pub max_find_results: usize,
    /// Page size used by `find_iter()` when none is given
    #[serde(default = "default_query_batch")]
    pub query_batch: u32,
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_ttl_seconds() -> u64 {
    30 * 60
}

fn default_max_find_results() -> usize {
    1000
}

fn default_query_batch() -> u32 {
    40
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    ///
    /// `STASHHAUS_ENDPOINT` and `STASHHAUS_API_KEY` override the file.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, a malformed one is not
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let mut config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)?
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        } else {
            return Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH
            )));
        };

        // The environment wins over the file
        config.apply_env_overrides(|name| env::var(name))?;
        config.validate()?;

        Ok(config)
    }

    /// Apply `STASHHAUS_ENDPOINT` and `STASHHAUS_API_KEY` as read through `var`
    ///
    /// Unset variables leave the configuration alone; a set but non-Unicode one is an error.
    pub fn apply_env_overrides<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let lookup = |name: &str| match var(name) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(ConfigError::Env(e)),
        };

        if let Some(endpoint) = lookup(ENDPOINT_VAR)? {
            self.client.endpoint = endpoint;
        }
        if let Some(api_key) = lookup(API_KEY_VAR)? {
            self.client.api_key = Some(api_key);
        }
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Client validations
        if self.client.endpoint.is_empty() {
            return Err(ConfigError::Invalid(
                "Client endpoint cannot be empty".to_string(),
            ));
        }
        if !self.client.endpoint.starts_with("http://")
            && !self.client.endpoint.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "Client endpoint must be an http(s) URL, got '{}'",
                self.client.endpoint
            )));
        }
        if self.client.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "Client timeout_seconds must be greater than 0".to_string(),
            ));
        }

        // Cache validations
        if let Some(name) = self.cache.type_ttl_seconds.keys().find(|name| name.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "Cache type_ttl_seconds contains an empty type name ('{}')",
                name
            )));
        }

        // Search validations
        if self.search.max_find_results == 0 {
            return Err(ConfigError::Invalid(
                "Search max_find_results must be greater than 0".to_string(),
            ));
        }
        if self.search.query_batch == 0 {
            return Err(ConfigError::Invalid(
                "Search query_batch must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(endpoint: String, timeout_seconds: u64) -> Self {
        Self {
            endpoint,
            timeout_seconds,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9999/graphql".to_string(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self {
            default_ttl_seconds,
            type_ttl_seconds: BTreeMap::new(),
        }
    }

    pub fn with_type_ttl(mut self, type_name: &str, ttl_seconds: u64) -> Self {
        self.type_ttl_seconds
            .insert(type_name.to_string(), ttl_seconds);
        self
    }

    /// Default TTL as Duration, `None` when expiration is disabled
    pub fn default_ttl(&self) -> Option<Duration> {
        ttl_from_seconds(self.default_ttl_seconds)
    }

    /// Per-type overrides as Durations, `None` meaning "never expires"
    pub fn type_ttls(&self) -> impl Iterator<Item = (&str, Option<Duration>)> {
        self.type_ttl_seconds
            .iter()
            .map(|(name, secs)| (name.as_str(), ttl_from_seconds(*secs)))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(default_ttl_seconds())
    }
}

impl SearchConfig {
    /// Create a new search configuration
    pub fn new(max_find_results: usize, query_batch: u32) -> Self {
        Self {
            max_find_results,
            query_batch,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(default_max_find_results(), default_query_batch())
    }
}

fn ttl_from_seconds(seconds: u64) -> Option<Duration> {
    (seconds > 0).then(|| Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_file_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [client]
            endpoint = "http://localhost:9999/graphql"
            "#,
        )
        .unwrap();

        assert_eq!(config.client.timeout_seconds, 30);
        assert_eq!(config.client.api_key, None);
        assert_eq!(config.cache.default_ttl(), Some(Duration::from_secs(1800)));
        assert_eq!(config.search.max_find_results, 1000);
        assert_eq!(config.search.query_batch, 40);
    }

    #[test]
    fn test_type_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
            [client]
            endpoint = "https://stash.local/graphql"

            [cache]
            default_ttl_seconds = 0

            [cache.type_ttl_seconds]
            Scene = 600
            Tag = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.cache.default_ttl(), None);
        let overrides: BTreeMap<&str, Option<Duration>> = config.cache.type_ttls().collect();
        assert_eq!(overrides["Scene"], Some(Duration::from_secs(600)));
        assert_eq!(overrides["Tag"], None);
    }

    #[test]
    fn test_rejects_zero_batch() {
        let err = AppConfig::from_toml_str(
            r#"
            [client]
            endpoint = "http://localhost:9999/graphql"

            [search]
            query_batch = 0
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("query_batch")));
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = AppConfig::default();
        config.client.endpoint = "localhost:9999".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.client.endpoint = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut config = AppConfig::from_toml_str(
            r#"
            [client]
            endpoint = "http://file:9999/graphql"
            api_key = "from-file"
            "#,
        )
        .unwrap();

        let vars = BTreeMap::from([
            ("STASHHAUS_ENDPOINT", "http://env:9999/graphql"),
            ("STASHHAUS_API_KEY", "from-env"),
        ]);
        config
            .apply_env_overrides(|name| {
                vars.get(name)
                    .map(|value| value.to_string())
                    .ok_or(env::VarError::NotPresent)
            })
            .unwrap();

        assert_eq!(config.client.endpoint, "http://env:9999/graphql");
        assert_eq!(config.client.api_key.as_deref(), Some("from-env"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unset_variables_keep_file_values() {
        let mut config = AppConfig::default();
        let before = config.client.endpoint.clone();

        config
            .apply_env_overrides(|_| Err(env::VarError::NotPresent))
            .unwrap();

        assert_eq!(config.client.endpoint, before);
        assert_eq!(config.client.api_key, None);
    }

    #[test]
    fn test_non_unicode_variable_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(|_| {
                Err(env::VarError::NotUnicode(std::ffi::OsString::from("bad")))
            })
            .unwrap_err();

        assert!(matches!(err, ConfigError::Env(_)));
    }

    #[test]
    fn test_missing_client_section_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[search]\nquery_batch = 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
