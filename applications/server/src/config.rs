/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Remote object-storage settings
///
/// The key pair is the long-lived credential exchanged by the broker for
/// short-lived session tokens; it never leaves this process. Empty values
/// are allowed at startup and surface as authorization errors at request
/// time.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub key_id: String,

    #[serde(default)]
    pub application_key: String,

    #[serde(default)]
    pub bucket_id: String,

    #[serde(default)]
    pub bucket_name: String,

    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    #[serde(default = "default_auth_url")]
    pub auth_url: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path is required to exist; otherwise `config.toml` is
    /// picked up when present. Environment variables override file values
    /// (prefix `ARIA`, section separator `__`, e.g. `ARIA_SERVER__PORT`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ARIA")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.index_path.as_os_str().is_empty() {
            return Err(ServerError::Config(
                "track index path is required (set ARIA_STORAGE__INDEX_PATH)".to_string(),
            ));
        }
        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        key_id: String::new(),
        application_key: String::new(),
        bucket_id: String::new(),
        bucket_name: String::new(),
        index_path: default_index_path(),
        auth_url: default_auth_url(),
    }
}

fn default_index_path() -> PathBuf {
    PathBuf::from("./data/tracks-index.json")
}

fn default_auth_url() -> String {
    "https://api.backblazeb2.com".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
        }
    }
}
