use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::poller::PollerConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auction_service: AuctionServiceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Remote auction service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuctionServiceConfig {
    /// Auction service base URL (e.g., "http://localhost:9200")
    pub url: String,
    /// API key for the auction service
    pub api_key: String,
    /// Request timeout in seconds (default: 30).
    /// Also bounds a single payment probe; a hung probe cannot outlive this.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub auction_service: SanitizedAuctionServiceConfig,
    pub poller: PollerConfig,
}

/// Sanitized auction service config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuctionServiceConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            auction_service: SanitizedAuctionServiceConfig {
                url: config.auction_service.url.clone(),
                api_key_configured: !config.auction_service.api_key.is_empty(),
                timeout_secs: config.auction_service.timeout_secs,
            },
            poller: config.poller.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_valid_config() {
        let toml = r#"
[auction_service]
url = "http://localhost:9200"
api_key = "test-api-key"

[server]
host = "127.0.0.1"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auction_service.url, "http://localhost:9200");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
    }

    #[test]
    fn test_deserialize_with_default_server() {
        let toml = r#"
[auction_service]
url = "http://localhost:9200"
api_key = "k"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_deserialize_missing_auction_service_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_poller_section() {
        let toml = r#"
[auction_service]
url = "http://localhost:9200"
api_key = "k"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.poller.interval_ms, 3000);
        assert_eq!(config.poller.max_attempts, 15);
    }

    #[test]
    fn test_default_timeout() {
        let toml = r#"
[auction_service]
url = "http://localhost:9200"
api_key = "k"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.auction_service.timeout_secs, 30);
    }

    #[test]
    fn test_sanitized_config() {
        let config = Config {
            auction_service: AuctionServiceConfig {
                url: "http://localhost:9200".to_string(),
                api_key: "secret-key".to_string(),
                timeout_secs: 60,
            },
            server: ServerConfig::default(),
            poller: PollerConfig::default(),
        };
        let sanitized = SanitizedConfig::from(&config);
        assert_eq!(sanitized.auction_service.url, "http://localhost:9200");
        assert!(sanitized.auction_service.api_key_configured);
        assert_eq!(sanitized.auction_service.timeout_secs, 60);
        assert_eq!(sanitized.server.port, 8080);
    }
}
