// Configuration module entry point
// Resolves node settings once at startup and holds the shared read-only state

mod source;
mod state;
mod types;
mod validate;

use std::net::{IpAddr, SocketAddr};

use crate::identity::IdentityError;

// Re-export public types
pub use source::ConfigSource;
pub use state::AppState;
pub use types::{Config, LoggingConfig};

/// Startup configuration errors, all fatal
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("load: {0}")]
    Load(#[from] config::ConfigError),
    #[error("uuid: {0}")]
    Identity(#[from] IdentityError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("address: {0}")]
    Address(String),
}

impl Config {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| ConfigError::Address(format!("invalid host '{}': {e}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
