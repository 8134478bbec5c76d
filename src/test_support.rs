//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::service::{GreetService, ServiceError};

/// A service that is always down.
pub struct FailingGreetService;

#[async_trait]
impl GreetService for FailingGreetService {
    fn name(&self) -> &str {
        "failing"
    }

    async fn greet(&self, _name: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Network("connection refused".to_string()))
    }
}

/// A service that records every call and holds replies until `open()`.
pub struct GatedGreetService {
    gate: watch::Sender<bool>,
    calls: Mutex<Vec<String>>,
}

impl GatedGreetService {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(false);
        Self {
            gate,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Lets every pending and future call reply.
    pub fn open(&self) {
        self.gate.send_replace(true);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GreetService for GatedGreetService {
    fn name(&self) -> &str {
        "gated"
    }

    async fn greet(&self, name: &str) -> Result<String, ServiceError> {
        self.calls.lock().unwrap().push(name.to_string());
        let mut open = self.gate.subscribe();
        let _ = open.wait_for(|open| *open).await;
        Ok(format!("Hello, {name}!"))
    }
}
