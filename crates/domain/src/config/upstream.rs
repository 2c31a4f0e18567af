use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

/// The single resolver every cache miss is forwarded to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

impl UpstreamConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "upstream address '{}' is not an IP address",
                self.address
            ))
        })?;
        Ok(SocketAddr::new(ip.to_canonical(), self.port))
    }
}

fn default_address() -> String {
    "1.1.1.1".to_string()
}

fn default_port() -> u16 {
    53
}
