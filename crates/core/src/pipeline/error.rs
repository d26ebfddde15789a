//! Error types for the render pipeline.

use thiserror::Error;

use super::traits::TransportError;

/// Errors surfaced to the user from a render job.
///
/// Metadata failures are deliberately absent: the pipeline falls back
/// to a plain copy and keeps going.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The user already has a render in flight.
    #[error("a render is already in progress for this user")]
    Busy,

    /// The source file could not be fetched.
    #[error("download failed: {0}")]
    Download(#[source] TransportError),

    /// The finished file could not be delivered.
    #[error("upload failed: {0}")]
    Upload(#[source] TransportError),

    /// Scratch-space I/O failed.
    #[error("scratch I/O failed: {0}")]
    Scratch(#[from] std::io::Error),
}

impl RenderError {
    /// Short message suitable for sending back to the chat.
    pub fn user_message(&self) -> String {
        match self {
            Self::Busy => "You already have a file being processed. Try again once it finishes."
                .to_string(),
            Self::Download(_) => "Couldn't download that file. Please send it again.".to_string(),
            Self::Upload(_) => "Couldn't upload the renamed file. Please try again.".to_string(),
            Self::Scratch(_) => "Something went wrong while processing the file.".to_string(),
        }
    }
}
