//! Error types for the metadata module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rewriting container metadata.
///
/// Callers are expected to absorb all of these: the render pipeline
/// degrades to a plain copy instead of surfacing them to the user.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The rewrite process failed.
    #[error("Metadata rewrite failed: {reason}")]
    Failed {
        reason: String,
        stderr: Option<String>,
    },

    /// The rewrite timed out.
    #[error("Metadata rewrite timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error during the rewrite.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    pub fn failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
            stderr,
        }
    }
}
