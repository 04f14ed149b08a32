//! Server Configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;

/// Port the legacy service listened on
const DEFAULT_PORT: u16 = 5019;

/// Server configuration, overridable from `ADVISOR_*` environment
/// variables (`ADVISOR_HOST`, `ADVISOR_PORT`, `ADVISOR_DATA_PATH`).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Optional JSON fixture file replacing the builtin sample data
    pub data_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            data_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", DEFAULT_PORT as i64)?
            .add_source(Environment::with_prefix("ADVISOR"))
            .build()?
            .try_deserialize()
    }

    /// Socket address string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5019);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_path: None,
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_from_env_uses_defaults() {
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 5019);
    }
}
