use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Bot token is not empty
/// - Owner id is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.bot.token.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "bot.token cannot be empty".to_string(),
        ));
    }

    if config.bot.owner_id == 0 {
        return Err(ConfigError::ValidationError(
            "bot.owner_id cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BotConfig, ScratchConfig, StorageConfig};
    use crate::metadata::MetadataConfig;

    fn config(token: &str, owner_id: i64) -> Config {
        Config {
            bot: BotConfig {
                token: token.to_string(),
                owner_id,
                admin_ids: Vec::new(),
                log_channel: None,
            },
            storage: StorageConfig::default(),
            scratch: ScratchConfig::default(),
            metadata: MetadataConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&config("123:abc", 42)).is_ok());
    }

    #[test]
    fn test_validate_empty_token_fails() {
        let result = validate_config(&config("  ", 42));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_zero_owner_fails() {
        let result = validate_config(&config("123:abc", 0));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
