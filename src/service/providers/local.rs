//! In-process greeter. Answers like the backend does, optionally after a
//! simulated round trip so the busy state is visible.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::service::{GreetService, ServiceError};

pub struct LocalGreetService {
    latency: Duration,
}

impl LocalGreetService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for LocalGreetService {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

#[async_trait]
impl GreetService for LocalGreetService {
    fn name(&self) -> &str {
        "local"
    }

    async fn greet(&self, name: &str) -> Result<String, ServiceError> {
        if !self.latency.is_zero() {
            debug!("Simulating {}ms greet latency", self.latency.as_millis());
            tokio::time::sleep(self.latency).await;
        }
        Ok(format!("Hello, {name}!"))
    }
}
