//! GraphQL transport
//!
//! [`GraphqlClient`] is the `Executor` the store uses against a live server:
//! it posts `{query, variables}` to the configured endpoint and unwraps the
//! `data` object of the reply.

use async_trait::async_trait;
use config::ClientConfig;
use entity_store::{Executor, ExecutorError};
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Header carrying the server's API key
const API_KEY_HEADER: &str = "apikey";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl std::fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl GraphqlClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(api_key)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Executor for GraphqlClient {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ExecutorError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphqlRequest {
                query,
                variables: &variables,
            })
            .send()
            .await
            .map_err(|e| ExecutorError::Transport(e.to_string()))?;

        let status = response.status();
        crate::debug_log!(endpoint = %self.endpoint, %status, "graphql reply");
        let body = response
            .bytes()
            .await
            .map_err(|e| ExecutorError::Transport(e.to_string()))?;

        match serde_json::from_slice::<GraphqlResponse>(&body) {
            Ok(reply) => into_data(reply),
            Err(_) if !status.is_success() => Err(ExecutorError::Transport(format!(
                "server answered {}",
                status
            ))),
            Err(e) => Err(ExecutorError::InvalidResponse(e.to_string())),
        }
    }
}

fn into_data(reply: GraphqlResponse) -> Result<Value, ExecutorError> {
    if !reply.errors.is_empty() {
        let messages = reply.errors.into_iter().map(|e| e.message).collect();
        return Err(ExecutorError::Server(messages));
    }

    match reply.data {
        None | Some(Value::Null) => Err(ExecutorError::InvalidResponse(
            "reply has neither data nor errors".to_string(),
        )),
        Some(data) => Ok(data),
    }
}
