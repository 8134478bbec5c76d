//! # Greet Service
//!
//! The remote call boundary: one operation, `greet(name) -> string`.
//! Transport lives entirely behind [`GreetService`]; the binder only sees a future.

pub mod provider;
pub mod providers;

use std::sync::Arc;

use log::info;

use crate::ServiceKind;
use crate::core::config::ResolvedConfig;

pub use provider::{GreetService, ServiceError};
pub use providers::{HttpGreetService, LocalGreetService};

/// Build a service from the resolved config.
pub fn build_service(config: &ResolvedConfig) -> Arc<dyn GreetService> {
    let service: Arc<dyn GreetService> = match config.service {
        ServiceKind::Local => Arc::new(LocalGreetService::new(config.local_latency)),
        ServiceKind::Http => Arc::new(HttpGreetService::new(
            config.http_base_url.clone(),
            config.http_timeout,
        )),
    };
    info!("Using greet service: {}", service.name());
    service
}
