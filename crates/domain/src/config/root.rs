use serde::{Deserialize, Serialize};

use super::auth::AuthConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::store::StoreConfig;

const DEFAULT_CONFIG_FILE: &str = "regieleki.toml";

/// Main configuration structure for Regieleki
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listen addresses for the DNS and HTTP servers
    #[serde(default)]
    pub server: ServerConfig,

    /// Forwarding and dispatcher limits
    #[serde(default)]
    pub dns: DnsConfig,

    /// Records file location
    #[serde(default)]
    pub store: StoreConfig,

    /// Management API authentication
    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. regieleki.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(addr) = overrides.dns_address {
            self.server.dns_address = addr;
        }
        if let Some(addr) = overrides.http_address {
            self.server.http_address = addr;
        }
        if let Some(path) = overrides.data_path {
            self.store.path = path;
        }
        if let Some(path) = overrides.token_path {
            self.auth.token_path = Some(path);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.dns_socket_addr()?;
        self.server.http_socket_addr()?;
        self.dns.upstream_addrs()?;

        if self.dns.max_concurrent_queries == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent_queries cannot be 0".to_string(),
            ));
        }

        if self.dns.forward_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "forward_timeout_ms cannot be 0".to_string(),
            ));
        }

        if self.store.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_address: Option<String>,
    pub http_address: Option<String>,
    pub data_path: Option<String>,
    pub token_path: Option<String>,
    pub log_level: Option<String>,
}
