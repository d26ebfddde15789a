//! Rule type.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::media::ChannelId;

/// A saved auto-rename rule.
///
/// Immutable once appended to a user's rule list; the only destructive
/// operation is clearing the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Template containing zero or more recognized placeholders.
    pub format: String,
    /// Keyword that activates this rule when present (case-insensitive)
    /// in an incoming filename.
    pub trigger: String,
    /// Origin-channel scope. Empty means the rule applies regardless of
    /// where the upload was forwarded from.
    #[serde(default)]
    pub channels: BTreeSet<ChannelId>,
    /// Rule-specific thumbnail; falls back to the user default when absent.
    #[serde(default)]
    pub thumb_path: Option<PathBuf>,
    pub created_at: DateTime<Utc>,
}

impl Rule {
    pub fn new(format: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            trigger: trigger.into(),
            channels: BTreeSet::new(),
            thumb_path: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_channels(mut self, channels: impl IntoIterator<Item = ChannelId>) -> Self {
        self.channels = channels.into_iter().collect();
        self
    }

    pub fn with_thumbnail(mut self, path: impl Into<PathBuf>) -> Self {
        self.thumb_path = Some(path.into());
        self
    }

    /// Whether this rule is restricted to specific origin channels.
    pub fn is_channel_scoped(&self) -> bool {
        !self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builder() {
        let rule = Rule::new("E{ep} {quality}", "naruto")
            .with_channels([ChannelId(-100), ChannelId(-200)])
            .with_thumbnail("/tmp/t.jpg");
        assert_eq!(rule.trigger, "naruto");
        assert!(rule.is_channel_scoped());
        assert_eq!(rule.channels.len(), 2);
        assert!(rule.thumb_path.is_some());
    }

    #[test]
    fn test_unscoped_by_default() {
        assert!(!Rule::new("{ep}", "x").is_channel_scoped());
    }
}
