use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Auction service URL is not empty
/// - Poller interval and attempt budget are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auction_service.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "auction_service.url cannot be empty".to_string(),
        ));
    }

    if config.poller.interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "poller.interval_ms cannot be 0".to_string(),
        ));
    }

    if config.poller.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "poller.max_attempts cannot be 0".to_string(),
        ));
    }

    Ok(())
}
