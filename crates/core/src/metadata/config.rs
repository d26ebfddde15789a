//! Configuration for the metadata writer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the FFmpeg-based metadata writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Path to ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Timeout for a single rewrite in seconds. The rewrite is a stream
    /// copy, so this mostly bounds disk throughput, not transcoding.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Value written into the container's encoder tag.
    #[serde(default = "default_encoder_tag")]
    pub encoder_tag: String,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[serde(default = "default_log_level")]
    pub ffmpeg_log_level: String,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_timeout() -> u64 {
    600 // 10 minutes
}

fn default_encoder_tag() -> String {
    "SutoRenameBot".to_string()
}

fn default_log_level() -> String {
    "error".to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            timeout_secs: default_timeout(),
            encoder_tag: default_encoder_tag(),
            ffmpeg_log_level: default_log_level(),
        }
    }
}
