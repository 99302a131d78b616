//! Configuration file support
//!
//! Loads server configuration from TOML files. Every section is optional;
//! missing values fall back to [`ServerConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{HttpClientConfig, ServerConfig};

/// Configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Server settings
    pub server: Option<ServerSettings>,
    /// Outbound HTTP client settings
    pub http_client: Option<HttpClientSettings>,
    /// Logging settings
    pub logging: Option<LoggingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to
    pub host: Option<String>,
    /// First port to try
    pub port: Option<u16>,
    /// End of the port search range (exclusive)
    pub port_range_end: Option<u16>,
    /// Enable CORS
    pub cors_enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientSettings {
    pub user_agent: Option<String>,
    pub title_suffix: Option<String>,
    pub youtube_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
    /// Output format (json, pretty)
    pub format: Option<String>,
}

impl ConfigFile {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Convert to ServerConfig
    pub fn into_server_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        let server = self.server;
        let http = self.http_client;
        let http_defaults = HttpClientConfig::default();

        ServerConfig {
            host: server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(defaults.host),
            port: server.as_ref().and_then(|s| s.port).unwrap_or(defaults.port),
            port_range_end: server
                .as_ref()
                .and_then(|s| s.port_range_end)
                .unwrap_or(defaults.port_range_end),
            cors_enabled: server
                .as_ref()
                .and_then(|s| s.cors_enabled)
                .unwrap_or(defaults.cors_enabled),
            log_level: self
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(defaults.log_level),
            log_format: self
                .logging
                .and_then(|l| l.format)
                .unwrap_or(defaults.log_format),
            http_client: match http {
                Some(h) => HttpClientConfig {
                    user_agent: h.user_agent.unwrap_or(http_defaults.user_agent),
                    title_suffix: h.title_suffix.unwrap_or(http_defaults.title_suffix),
                    youtube_base_url: h
                        .youtube_base_url
                        .unwrap_or(http_defaults.youtube_base_url),
                    timeout_secs: h.timeout_secs,
                },
                None => http_defaults,
            },
        }
    }
}

/// Load a configuration file, falling back to defaults when it is absent.
///
/// The error string is returned alongside the defaults so the caller can log
/// it once logging is initialized.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> (ServerConfig, Option<String>) {
    let path = path.as_ref();
    if !path.exists() {
        return (ServerConfig::default(), None);
    }
    match ConfigFile::from_file(path) {
        Ok(cf) => (cf.into_server_config(), None),
        Err(e) => (
            ServerConfig::default(),
            Some(format!(
                "Failed to load config file {}: {}. Using defaults.",
                path.display(),
                e
            )),
        ),
    }
}
