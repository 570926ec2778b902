//! Aria Server Library
//!
//! Catalog API plus a same-origin streaming proxy that hides long-lived
//! storage credentials behind short-lived, prefix-scoped download
//! authorizations.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{ServerConfig, StorageSettings};
pub use error::{Result, ServerError};
pub use services::broker::{Clock, CredentialBroker, SystemClock};
pub use state::AppState;
