//! Trait definitions for the metadata module.

use async_trait::async_trait;
use std::path::PathBuf;

use super::error::MetadataError;

/// One metadata rewrite: read `input`, write `output` with the title set.
#[derive(Debug, Clone)]
pub struct MetadataJob {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Container title. When `None`, implementations derive it from the
    /// output filename's stem.
    pub title: Option<String>,
}

/// A writer that copies a media file while rewriting its container
/// metadata. Treated as a black box by the rest of the system: the only
/// contract is "output exists on success".
#[async_trait]
pub trait MetadataWriter: Send + Sync {
    /// Returns the name of this writer implementation.
    fn name(&self) -> &str;

    /// Performs the rewrite.
    async fn write(&self, job: MetadataJob) -> Result<(), MetadataError>;

    /// Validates that the writer is properly configured and ready.
    async fn validate(&self) -> Result<(), MetadataError>;
}
