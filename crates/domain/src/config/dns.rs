use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Upstream resolvers, tried in order. Empty means "discover from the
    /// system resolver configuration".
    #[serde(default)]
    pub upstreams: Vec<String>,

    #[serde(default = "default_max_concurrent_queries")]
    pub max_concurrent_queries: usize,

    #[serde(default = "default_forward_timeout_ms")]
    pub forward_timeout_ms: u64,

    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstreams: Vec::new(),
            max_concurrent_queries: default_max_concurrent_queries(),
            forward_timeout_ms: default_forward_timeout_ms(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

impl DnsConfig {
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.forward_timeout_ms)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn upstream_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.upstreams
            .iter()
            .map(|s| {
                s.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!("Invalid upstream address '{}': {}", s, e))
                })
            })
            .collect()
    }
}

fn default_max_concurrent_queries() -> usize {
    1000
}

fn default_forward_timeout_ms() -> u64 {
    2000
}

fn default_shutdown_grace_secs() -> u64 {
    5
}
