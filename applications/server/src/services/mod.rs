/// Service modules
pub mod broker;

pub use broker::{Clock, CredentialBroker, SystemClock};
