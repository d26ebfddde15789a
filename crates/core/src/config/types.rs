use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::MetadataConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub scratch: ScratchConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Bot identity and access control
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    /// Bot API token
    pub token: String,
    /// User id of the bot owner; always allowed
    pub owner_id: i64,
    /// Additional user ids allowed to use the bot
    #[serde(default)]
    pub admin_ids: Vec<i64>,
    /// Channel every delivered file is mirrored to, if set
    #[serde(default)]
    pub log_channel: Option<i64>,
}

impl BotConfig {
    /// Whether `user_id` is allowed to use the bot.
    pub fn is_allowed(&self, user_id: i64) -> bool {
        user_id == self.owner_id || self.admin_ids.contains(&user_id)
    }
}

/// Rule and profile storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            path: default_db_path(),
        }
    }
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::Sqlite
}

fn default_db_path() -> PathBuf {
    PathBuf::from("suto.db")
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

/// Scratch space for in-flight downloads and rewrites
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScratchConfig {
    #[serde(default = "default_scratch_root")]
    pub root: PathBuf,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            root: default_scratch_root(),
        }
    }
}

fn default_scratch_root() -> PathBuf {
    PathBuf::from("scratch")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[bot]
token = "123:abc"
owner_id = 42
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bot.token, "123:abc");
        assert_eq!(config.bot.owner_id, 42);
        assert!(config.bot.admin_ids.is_empty());
        assert!(config.bot.log_channel.is_none());
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.storage.path.to_str().unwrap(), "suto.db");
        assert_eq!(config.scratch.root.to_str().unwrap(), "scratch");
    }

    #[test]
    fn test_deserialize_missing_bot_fails() {
        let toml = r#"
[storage]
backend = "memory"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[bot]
token = "123:abc"
owner_id = 42
admin_ids = [7, 8]
log_channel = -100123

[storage]
backend = "memory"
path = "/data/suto.db"

[scratch]
root = "/tmp/suto"

[metadata]
ffmpeg_path = "/usr/local/bin/ffmpeg"
timeout_secs = 120
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bot.admin_ids, vec![7, 8]);
        assert_eq!(config.bot.log_channel, Some(-100123));
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.scratch.root.to_str().unwrap(), "/tmp/suto");
        assert_eq!(
            config.metadata.ffmpeg_path.to_str().unwrap(),
            "/usr/local/bin/ffmpeg"
        );
        assert_eq!(config.metadata.timeout_secs, 120);
    }

    #[test]
    fn test_is_allowed() {
        let bot = BotConfig {
            token: "t".to_string(),
            owner_id: 1,
            admin_ids: vec![2],
            log_channel: None,
        };
        assert!(bot.is_allowed(1));
        assert!(bot.is_allowed(2));
        assert!(!bot.is_allowed(3));
    }
}
