//! Request and progress types for the render pipeline.

use crate::media::{ChannelId, IncomingMedia, UserId};
use crate::rules::Rule;

/// Where the output name comes from.
#[derive(Debug, Clone)]
pub enum NamingSource {
    /// A stored rule matched; its template is rendered against the
    /// incoming filename and its thumbnail takes priority.
    Rule(Rule),
    /// The user typed the name out; used verbatim after sanitization.
    Manual(String),
}

/// One render job: a single incoming file for a single user.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub user: UserId,
    /// Chat to deliver the finished file to.
    pub chat: ChannelId,
    pub media: IncomingMedia,
    pub source: NamingSource,
}

/// Coarse progress events, emitted in order. Consumers drive status
/// messages off these; the pipeline never blocks on a slow consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderProgress {
    Downloading,
    WritingMetadata,
    Uploading,
    Completed,
    Failed,
}

/// What a successful render produced.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Final sanitized filename, extension included.
    pub output_name: String,
    /// Message delivered to the requesting chat.
    pub delivered: super::DeliveredMessage,
    /// Whether the log-channel mirror went through.
    pub mirrored: bool,
}
