//! Identifiers and the incoming-upload projection shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque Telegram user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque chat/channel identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ChannelId(pub i64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of media kinds the bot accepts.
///
/// Resolved once at ingress; downstream code never probes the transport
/// message again to find out which media field was populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Document,
    Audio,
}

impl MediaKind {
    /// Whether the renamed artifact should be delivered as a streamable
    /// video rather than a generic document.
    pub fn is_video(&self) -> bool {
        matches!(self, MediaKind::Video)
    }
}

/// Uniform projection of an incoming upload.
#[derive(Debug, Clone)]
pub struct IncomingMedia {
    pub kind: MediaKind,
    /// Transport file handle used for the download.
    pub file_id: String,
    /// Original filename, when the transport knows it.
    pub file_name: Option<String>,
    /// Size in bytes, when the transport reports it. Display only.
    pub file_size: Option<u64>,
    /// Channel the message was forwarded from, when provenance is known.
    pub origin_channel: Option<ChannelId>,
}

impl IncomingMedia {
    /// Filename to base renaming on. Uploads without a name get a
    /// synthetic timestamped one, matching what users see elsewhere.
    pub fn base_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| format!("media_{}", chrono::Utc::now().timestamp()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_prefers_original() {
        let media = IncomingMedia {
            kind: MediaKind::Video,
            file_id: "abc".to_string(),
            file_name: Some("Show.S01E01.mkv".to_string()),
            file_size: Some(1024),
            origin_channel: None,
        };
        assert_eq!(media.base_name(), "Show.S01E01.mkv");
    }

    #[test]
    fn test_base_name_synthesized_when_missing() {
        let media = IncomingMedia {
            kind: MediaKind::Document,
            file_id: "abc".to_string(),
            file_name: None,
            file_size: None,
            origin_channel: None,
        };
        assert!(media.base_name().starts_with("media_"));
    }

    #[test]
    fn test_only_video_kind_streams() {
        assert!(MediaKind::Video.is_video());
        assert!(!MediaKind::Document.is_video());
        assert!(!MediaKind::Audio.is_video());
    }
}
