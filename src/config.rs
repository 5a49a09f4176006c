use std::time::Duration;

use crate::cache::{DEFAULT_CAPACITY, SWEEP_INTERVAL};
use crate::drive::ClientConfig;

/// Runtime configuration, assembled from command-line flags and environment
#[derive(Debug, Clone)]
pub struct Config {
    pub client: ClientConfig,
    /// Initial access token
    pub access_token: Option<String>,
    /// Id of the folder treated as the logical root
    pub root_id: Option<String>,
    /// Maximum number of sessions kept in the cache
    pub cache_capacity: usize,
    /// Period of the background cache sweep
    pub sweep_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            access_token: None,
            root_id: None,
            cache_capacity: DEFAULT_CAPACITY,
            sweep_interval: SWEEP_INTERVAL,
        }
    }
}
