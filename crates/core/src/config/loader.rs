use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides.
/// Sections split on a double underscore so snake_case keys stay
/// addressable, e.g. `SUTO_BOT__OWNER_ID` maps to `bot.owner_id`.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("SUTO_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[bot]
token = "123:abc"
owner_id = 42
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.bot.owner_id, 42);
    }

    #[test]
    fn test_load_config_from_str_missing_bot() {
        let toml = r#"
[scratch]
root = "/tmp"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_env_override_reaches_snake_case_keys() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[bot]
token = "123:abc"
owner_id = 42
"#
        )
        .unwrap();

        std::env::set_var("SUTO_BOT__OWNER_ID", "77");
        let config = load_config(temp_file.path());
        std::env::remove_var("SUTO_BOT__OWNER_ID");

        let config = config.unwrap();
        assert_eq!(config.bot.owner_id, 77);
        assert_eq!(config.bot.token, "123:abc");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[bot]
token = "123:abc"
owner_id = 42

[storage]
backend = "memory"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.bot.token, "123:abc");
        assert_eq!(
            config.storage.backend,
            crate::config::StorageBackend::Memory
        );
    }
}
