//! Profile storage trait.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::media::UserId;

/// Error type for profile store operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("database error: {0}")]
    Database(String),
}

/// Per-user default thumbnail and metadata-title storage.
///
/// The thumbnail stored here is the fallback used when a matched rule has
/// no thumbnail of its own; the title overrides the filename-derived
/// container title during metadata rewriting.
pub trait ProfileStore: Send + Sync {
    /// Sets (or replaces) the user's default thumbnail path.
    fn set_thumbnail(&self, user: UserId, path: &Path) -> Result<(), ProfileError>;

    /// Returns the user's default thumbnail path, if set.
    fn thumbnail(&self, user: UserId) -> Result<Option<PathBuf>, ProfileError>;

    /// Clears the user's default thumbnail, returning the removed path so
    /// the caller can delete the backing file.
    fn clear_thumbnail(&self, user: UserId) -> Result<Option<PathBuf>, ProfileError>;

    /// Sets (or replaces) the user's metadata title.
    fn set_title(&self, user: UserId, title: &str) -> Result<(), ProfileError>;

    /// Returns the user's metadata title, if set.
    fn title(&self, user: UserId) -> Result<Option<String>, ProfileError>;
}
