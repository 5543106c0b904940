use crate::errors::ExecutorError;
use async_trait::async_trait;
use serde_json::Value;

/// Runs one query document against the remote service
///
/// Implementations return the reply's `data` object. Retries, authentication and
/// connection pooling belong to the implementation, not to the store.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ExecutorError>;
}
