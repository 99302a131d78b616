//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser identity sent with page fetches. Some hosts vary the page they
/// serve by client identity.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// User-Agent header for title and provider requests
    pub user_agent: String,

    /// Site-name suffix stripped from page titles
    pub title_suffix: String,

    /// Base URL of the video host used by the transcript provider
    pub youtube_base_url: String,

    /// Optional request timeout in seconds (none means wait for upstream)
    pub timeout_secs: Option<u64>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            title_suffix: " - YouTube".to_string(),
            youtube_base_url: "https://www.youtube.com".to_string(),
            timeout_secs: None,
        }
    }
}

impl HttpClientConfig {
    /// Build a reqwest client carrying the configured identity and timeout
    pub fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder().user_agent(self.user_agent.clone());
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// First port tried when binding
    pub port: u16,

    /// End of the port search range (exclusive)
    pub port_range_end: u16,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log output format (pretty, json)
    pub log_format: String,

    /// Outbound HTTP settings
    pub http_client: HttpClientConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            port_range_end: 5100,
            cors_enabled: true,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            http_client: HttpClientConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Ports tried in order when binding
    pub fn port_candidates(&self) -> std::ops::Range<u16> {
        self.port..self.port_range_end.max(self.port.saturating_add(1))
    }

    /// Default tracing filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> String {
        format!(
            "transcript_server={level},tower_http={level}",
            level = self.log_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.port_range_end, 5100);
        assert_eq!(config.http_client.title_suffix, " - YouTube");
        assert!(config.http_client.timeout_secs.is_none());
    }

    #[test]
    fn test_port_candidates_never_empty() {
        let config = ServerConfig {
            port: 6000,
            port_range_end: 10,
            ..Default::default()
        };
        assert_eq!(config.port_candidates(), 6000..6001);

        let config = ServerConfig::default();
        assert_eq!(config.port_candidates().len(), 100);
    }

    #[test]
    fn test_log_filter() {
        let config = ServerConfig {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.log_filter(),
            "transcript_server=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_build_client() {
        let http = HttpClientConfig {
            timeout_secs: Some(5),
            ..Default::default()
        };
        assert!(http.build_client().is_ok());
    }
}
