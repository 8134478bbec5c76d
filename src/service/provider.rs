use async_trait::async_trait;
use thiserror::Error;

use crate::core::binder::ActionFailure;

/// Errors that can occur while calling the greet service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Service misconfigured (empty or malformed URL).
    #[error("config error: {0}")]
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    /// The response body was not a greeting.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<ServiceError> for ActionFailure {
    fn from(err: ServiceError) -> Self {
        ActionFailure::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait GreetService: Send + Sync {
    /// Returns the name of the service.
    fn name(&self) -> &str;

    /// Asks the service to greet `name`.
    async fn greet(&self, name: &str) -> Result<String, ServiceError>;
}
