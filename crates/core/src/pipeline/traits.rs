//! Transport seam between the pipeline and the chat platform.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::media::{ChannelId, MediaKind};

/// Errors crossing the transport boundary.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("download failed: {0}")]
    Download(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("mirror failed: {0}")]
    Mirror(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished artifact to hand back to the requesting chat.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub chat: ChannelId,
    pub path: PathBuf,
    /// Filename shown to the recipient; also used for the caption.
    pub file_name: String,
    /// Video goes out streamable, everything else as a document.
    pub kind: MediaKind,
    pub thumbnail: Option<PathBuf>,
}

/// Reference to a message the transport delivered.
#[derive(Debug, Clone, Copy)]
pub struct DeliveredMessage {
    pub chat: ChannelId,
    pub message_id: i32,
}

/// The chat platform, as the pipeline sees it.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Downloads the file behind `file_id` to `dest`.
    async fn download(&self, file_id: &str, dest: &Path) -> Result<(), TransportError>;

    /// Uploads the artifact to the requesting chat.
    async fn deliver(&self, delivery: Delivery) -> Result<DeliveredMessage, TransportError>;

    /// Copies an already-delivered message to another destination,
    /// byte-identical to what the user received.
    async fn mirror(
        &self,
        message: &DeliveredMessage,
        dest: ChannelId,
    ) -> Result<(), TransportError>;
}
