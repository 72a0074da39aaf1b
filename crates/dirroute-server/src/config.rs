// File: src/config.rs
// Purpose: Server configuration parsing from dirroute.toml

use anyhow::{Context, Result};
use dirroute::DiscoveryOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "dirroute.toml";

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// Route discovery; unset means the server defaults (`routes`, `.toml`)
    #[serde(default)]
    pub routing: Option<DiscoveryOptions>,
}

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// A missing or empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Discovery options after command-line overrides
    ///
    /// Without a `[routing]` table the server serves `.toml` handler files.
    pub fn discovery(&self, dir: Option<PathBuf>, extensions: &[String]) -> DiscoveryOptions {
        let mut options = self
            .routing
            .clone()
            .unwrap_or_else(|| DiscoveryOptions::new().extensions(["toml"]));

        if let Some(dir) = dir {
            options = options.directory(dir);
        }
        if !extensions.is_empty() {
            options = options.extensions(extensions.iter().cloned());
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "127.0.0.1:3000");
        assert!(config.routing.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "  \n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert!(config.routing.is_none());
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r#"
[server]
port = 8080

[routing]
directory = "api"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.addr(), "127.0.0.1:8080");

        let routing = config.routing.unwrap();
        assert_eq!(routing.directory, PathBuf::from("api"));
        assert_eq!(routing.extensions, vec!["ts", "js"]);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "[server]\nport = \"eighty\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_server_defaults_to_toml_handlers() {
        let options = Config::default().discovery(None, &[]);
        assert_eq!(options.directory, PathBuf::from("routes"));
        assert_eq!(options.extensions, vec!["toml"]);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            routing: Some(DiscoveryOptions::new().directory("api")),
            ..Config::default()
        };

        let options = config.discovery(Some(PathBuf::from("handlers")), &[".toml".to_string()]);
        assert_eq!(options.directory, PathBuf::from("handlers"));
        assert_eq!(options.extensions, vec!["toml"]);

        let options = config.discovery(None, &[]);
        assert_eq!(options.directory, PathBuf::from("api"));
        assert_eq!(options.extensions, vec!["ts", "js"]);
    }
}
