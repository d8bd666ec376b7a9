//! Server configuration.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use kupon_ext_iss::IssConfig;
use kupon_traits::config::EngineConfig;

/// Environment variable overriding [`ServerConfig::port`].
pub const PORT_ENV: &str = "APP_PORT";

/// Where market data comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// The exchange ISS API
    #[default]
    Iss,
    /// A JSON fixture file
    File,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Time in-flight requests get to finish after a shutdown signal
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Market data provider
    #[serde(default)]
    pub provider: ProviderKind,

    /// Fixture file for `provider = "file"`
    pub fixtures_file: Option<String>,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,

    /// ISS settings
    #[serde(default)]
    pub iss: IssConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    7540
}

fn default_shutdown_timeout() -> u64 {
    20
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            provider: ProviderKind::Iss,
            fixtures_file: None,
            engine: EngineConfig::default(),
            iss: IssConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Address to bind, from `host` and `port`.
    ///
    /// A `host` that is not an IP address is an `InvalidInput` error.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::io::Error> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host {:?}: {e}", self.host),
            )
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_port_override(std::env::var(PORT_ENV).ok())
    }

    /// Replace the port with `value` when it is a valid port number.
    pub fn with_port_override(mut self, value: Option<String>) -> Self {
        if let Some(value) = value {
            match value.trim().parse::<u16>() {
                Ok(port) => self.port = port,
                Err(_) => warn!(%value, "ignoring invalid {}", PORT_ENV),
            }
        }
        self
    }

    /// Shutdown drain timeout.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kupon_traits::config::FetchMode;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 7540);
        assert_eq!(config.shutdown_timeout(), Duration::from_secs(20));
        assert_eq!(config.provider, ProviderKind::Iss);
    }

    #[test]
    fn test_nested_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            port = 8081
            provider = "file"
            fixtures_file = "fixtures/bonds.json"

            [engine]
            fetch_mode = "concurrent"

            [iss]
            request_timeout = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.provider, ProviderKind::File);
        assert_eq!(config.engine.fetch_mode, FetchMode::Concurrent);
        assert_eq!(config.engine.tax_rate, 0.13);
        assert_eq!(config.iss.request_timeout, 5);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:7540");

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn test_mistyped_host_is_rejected() {
        let config = ServerConfig {
            host: "127.0.0.l".to_string(),
            ..Default::default()
        };
        let err = config.socket_addr().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("127.0.0.l"));
    }

    #[test]
    fn test_port_override() {
        let config = ServerConfig::default().with_port_override(Some("9000".into()));
        assert_eq!(config.port, 9000);

        let config = ServerConfig::default().with_port_override(Some("not-a-port".into()));
        assert_eq!(config.port, 7540);

        let config = ServerConfig::default().with_port_override(None);
        assert_eq!(config.port, 7540);
    }
}
