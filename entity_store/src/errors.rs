use thiserror::Error;

/// Failures reported by an [`Executor`](crate::Executor)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutorError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server returned errors: {}", .0.join("; "))]
    Server(Vec<String>),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Remote request failed: {0}")]
    Remote(#[from] ExecutorError),

    #[error(
        "Query matched {count} {type_name} records but find() returns at most {limit}; \
         use find_iter() to stream large result sets"
    )]
    TooManyResults {
        type_name: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("Invalid query batch size {0}: must be a positive integer")]
    InvalidBatchSize(u32),

    #[error("Invalid filter '{key}': {reason}")]
    InvalidFilter { key: String, reason: String },

    #[error("Malformed {type_name} response: {reason}")]
    MalformedResponse {
        type_name: &'static str,
        reason: String,
    },
}

impl StoreError {
    pub(crate) fn invalid_filter(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            type_name,
            reason: reason.into(),
        }
    }

    /// Errors caused by the caller's arguments rather than the remote side
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::TooManyResults { .. } | Self::InvalidBatchSize(_) | Self::InvalidFilter { .. }
        )
    }
}
