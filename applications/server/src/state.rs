/// Shared application state
use crate::config::ServerConfig;
use crate::services::CredentialBroker;
use aria_catalog::Catalog;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub broker: Arc<CredentialBroker>,
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        broker: Arc<CredentialBroker>,
        config: Arc<ServerConfig>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            catalog,
            broker,
            config,
            http,
        }
    }
}
