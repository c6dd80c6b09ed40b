use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_address")]
    pub dns_address: String,

    #[serde(default = "default_http_address")]
    pub http_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_address: default_dns_address(),
            http_address: default_http_address(),
        }
    }
}

impl ServerConfig {
    pub fn dns_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_listen_addr(&self.dns_address)
    }

    pub fn http_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_listen_addr(&self.http_address)
    }
}

/// Parses a listen address, accepting the `:PORT` shorthand.
///
/// `:PORT` binds `0.0.0.0` and so listens on IPv4 only. Use `[::]:PORT` for
/// a dual-stack listener.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    let full = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    full.parse()
        .map_err(|e| ConfigError::Validation(format!("Invalid listen address '{}': {}", addr, e)))
}

fn default_dns_address() -> String {
    "0.0.0.0:53".to_string()
}

fn default_http_address() -> String {
    "0.0.0.0:13860".to_string()
}
