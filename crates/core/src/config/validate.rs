use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Directory base URL and country are set
/// - Directory limit and timeout are positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Directory validation
    let directory = &config.directory;
    if directory.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "directory.base_url cannot be empty".to_string(),
        ));
    }
    if directory.country.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "directory.country cannot be empty".to_string(),
        ));
    }
    if directory.limit == 0 {
        return Err(ConfigError::ValidationError(
            "directory.limit must be at least 1".to_string(),
        ));
    }
    if directory.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "directory.timeout_secs must be at least 1".to_string(),
        ));
    }

    Ok(())
}
