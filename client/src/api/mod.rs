//! Endpoint calls. Each submodule adds its methods to [`DirectoryClient`].

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::net_utils::request_lifecycle::RequestLifecycle;

pub mod locations;
pub mod search;
mod update_request;

/// Cheap-to-clone handle to every remote endpoint the directory uses.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    config: Arc<ClientConfig>,
    lifecycle: RequestLifecycle,
}

impl DirectoryClient {
    pub fn new(config: ClientConfig) -> Self {
        let lifecycle = RequestLifecycle::new(config.request_timeout);
        Self { config: Arc::new(config), lifecycle }
    }

    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &RequestLifecycle {
        &self.lifecycle
    }
}
