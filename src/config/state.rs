// Application state module
// Immutable data shared by every connection task

use super::types::Config;
use super::ConfigError;
use crate::identity::NodeId;
use crate::subscription;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Reference identity, decoded once
    pub node_id: NodeId,
    /// `/{sub_path}`
    pub subscription_path: String,
    /// `/{xpath}/`
    pub handshake_prefix: String,
    /// Pre-rendered subscription body
    pub subscription_payload: String,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let node_id = config.uuid.parse::<NodeId>()?;
        let subscription_path = format!("/{}", config.sub_path);
        let handshake_prefix = format!("/{}/", config.xpath);
        let subscription_payload = subscription::build_payload(&config);

        Ok(Self {
            config,
            node_id,
            subscription_path,
            handshake_prefix,
            subscription_payload,
        })
    }
}
