//! HTTP greet service.
//!
//! `POST {base_url}/greet` with `{"name": "..."}`, answered by
//! `{"greeting": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::service::{GreetService, ServiceError};

#[derive(Serialize, Debug)]
struct GreetRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize, Debug)]
struct GreetResponse {
    greeting: String,
}

pub struct HttpGreetService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGreetService {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    fn endpoint(&self) -> Result<String, ServiceError> {
        let base = self.base_url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ServiceError::Config("greet service URL is empty".to_string()));
        }
        Ok(format!("{base}/greet"))
    }
}

#[async_trait]
impl GreetService for HttpGreetService {
    fn name(&self) -> &str {
        "http"
    }

    async fn greet(&self, name: &str) -> Result<String, ServiceError> {
        let url = self.endpoint()?;
        info!("Greet request: url={}, name_len={}", url, name.len());

        let response = self
            .client
            .post(&url)
            .json(&GreetRequest { name })
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Greet response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Greet service error: {} - {}", status, message);
            return Err(ServiceError::Api { status, message });
        }

        let body: GreetResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        Ok(body.greeting)
    }
}
