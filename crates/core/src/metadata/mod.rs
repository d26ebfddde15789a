//! Container-metadata rewriting via an external transcoder.

mod config;
mod error;
mod ffmpeg;
mod traits;

pub use config::MetadataConfig;
pub use error::MetadataError;
pub use ffmpeg::FfmpegMetadataWriter;
pub use traits::{MetadataJob, MetadataWriter};
