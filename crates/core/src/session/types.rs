//! Session state and the pure transition function.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::media::ChannelId;
use crate::rules::Rule;

/// Where the configuration dialog currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingFormat,
    AwaitingTrigger,
    AwaitingTargetChannels,
    AwaitingThumbnail,
}

/// One user input fed into the dialog, already classified by the caller.
#[derive(Debug, Clone)]
pub enum SessionInput {
    /// Plain text message.
    Text(String),
    /// A message forwarded from a channel, carrying its identity.
    ForwardedChannel(ChannelId),
    /// An image already downloaded to a local path.
    Image(PathBuf),
    /// The explicit skip signal (`/no`).
    Skip,
    /// The explicit finish signal (`/done`).
    Done,
}

/// Result of feeding one input into a session.
#[derive(Debug, Clone)]
pub enum Advance {
    /// The dialog moved to the given state; prompt for it.
    Next(SessionState),
    /// Input rejected; re-prompt for the current state, nothing changed.
    Rejected(SessionState),
    /// A target channel was recorded; the dialog stays where it is.
    ChannelAdded(ChannelId),
    /// The dialog finished; this rule is ready to be persisted.
    Finished(Rule),
}

/// Transient per-user dialog state.
///
/// Fields fill in progressively as the dialog advances; `format` and
/// `trigger` are always set by the time the session can finish.
#[derive(Debug, Clone)]
pub struct Session {
    pub state: SessionState,
    pub format: Option<String>,
    pub trigger: Option<String>,
    pub channels: BTreeSet<ChannelId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh session, waiting for the format text.
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingFormat,
            format: None,
            trigger: None,
            channels: BTreeSet::new(),
        }
    }

    /// Feeds one input into the dialog.
    ///
    /// Empty or out-of-place inputs are rejected without a transition;
    /// the skip and finish signals behave identically in the channel
    /// step. Cancellation is not an input here — the caller simply drops
    /// the session.
    pub fn advance(&mut self, input: SessionInput) -> Advance {
        match self.state {
            SessionState::AwaitingFormat => match input {
                SessionInput::Text(text) if !text.trim().is_empty() => {
                    self.format = Some(text.trim().to_string());
                    self.state = SessionState::AwaitingTrigger;
                    Advance::Next(self.state)
                }
                _ => Advance::Rejected(self.state),
            },
            SessionState::AwaitingTrigger => match input {
                SessionInput::Text(text) if !text.trim().is_empty() => {
                    self.trigger = Some(text.trim().to_string());
                    self.state = SessionState::AwaitingTargetChannels;
                    Advance::Next(self.state)
                }
                _ => Advance::Rejected(self.state),
            },
            SessionState::AwaitingTargetChannels => match input {
                SessionInput::Skip | SessionInput::Done => {
                    self.state = SessionState::AwaitingThumbnail;
                    Advance::Next(self.state)
                }
                SessionInput::ForwardedChannel(channel) => {
                    self.channels.insert(channel);
                    Advance::ChannelAdded(channel)
                }
                _ => Advance::Rejected(self.state),
            },
            SessionState::AwaitingThumbnail => match input {
                SessionInput::Skip => Advance::Finished(self.build_rule(None)),
                SessionInput::Image(path) => Advance::Finished(self.build_rule(Some(path))),
                _ => Advance::Rejected(self.state),
            },
        }
    }

    fn build_rule(&self, thumb_path: Option<PathBuf>) -> Rule {
        let mut rule = Rule::new(
            self.format.clone().unwrap_or_default(),
            self.trigger.clone().unwrap_or_default(),
        )
        .with_channels(self.channels.iter().copied());
        rule.thumb_path = thumb_path;
        rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SessionInput {
        SessionInput::Text(s.to_string())
    }

    #[test]
    fn test_happy_path_no_channels_no_thumb() {
        let mut session = Session::new();

        assert!(matches!(
            session.advance(text("Naruto E{ep} {quality}")),
            Advance::Next(SessionState::AwaitingTrigger)
        ));
        assert!(matches!(
            session.advance(text("naruto")),
            Advance::Next(SessionState::AwaitingTargetChannels)
        ));
        assert!(matches!(
            session.advance(SessionInput::Skip),
            Advance::Next(SessionState::AwaitingThumbnail)
        ));

        match session.advance(SessionInput::Skip) {
            Advance::Finished(rule) => {
                assert_eq!(rule.format, "Naruto E{ep} {quality}");
                assert_eq!(rule.trigger, "naruto");
                assert!(rule.channels.is_empty());
                assert!(rule.thumb_path.is_none());
            }
            other => panic!("expected Finished, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_format_reprompts_without_transition() {
        let mut session = Session::new();
        assert!(matches!(
            session.advance(text("   ")),
            Advance::Rejected(SessionState::AwaitingFormat)
        ));
        assert_eq!(session.state, SessionState::AwaitingFormat);
        assert!(session.format.is_none());
    }

    #[test]
    fn test_channels_accumulate_until_done() {
        let mut session = Session::new();
        session.advance(text("fmt"));
        session.advance(text("trig"));

        assert!(matches!(
            session.advance(SessionInput::ForwardedChannel(ChannelId(-1))),
            Advance::ChannelAdded(ChannelId(-1))
        ));
        assert!(matches!(
            session.advance(SessionInput::ForwardedChannel(ChannelId(-2))),
            Advance::ChannelAdded(ChannelId(-2))
        ));
        assert_eq!(session.state, SessionState::AwaitingTargetChannels);

        session.advance(SessionInput::Done);
        match session.advance(SessionInput::Skip) {
            Advance::Finished(rule) => assert_eq!(rule.channels.len(), 2),
            other => panic!("expected Finished, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_and_done_are_equivalent_in_channel_step() {
        for signal in [SessionInput::Skip, SessionInput::Done] {
            let mut session = Session::new();
            session.advance(text("fmt"));
            session.advance(text("trig"));
            assert!(matches!(
                session.advance(signal),
                Advance::Next(SessionState::AwaitingThumbnail)
            ));
        }
    }

    #[test]
    fn test_stray_text_in_channel_step_rejected() {
        let mut session = Session::new();
        session.advance(text("fmt"));
        session.advance(text("trig"));
        assert!(matches!(
            session.advance(text("hello?")),
            Advance::Rejected(SessionState::AwaitingTargetChannels)
        ));
        assert!(session.channels.is_empty());
    }

    #[test]
    fn test_image_finalizes_with_thumbnail() {
        let mut session = Session::new();
        session.advance(text("fmt"));
        session.advance(text("trig"));
        session.advance(SessionInput::Skip);

        match session.advance(SessionInput::Image(PathBuf::from("/tmp/rule.jpg"))) {
            Advance::Finished(rule) => {
                assert_eq!(rule.thumb_path, Some(PathBuf::from("/tmp/rule.jpg")));
            }
            other => panic!("expected Finished, got {:?}", other),
        }
    }

    #[test]
    fn test_text_in_thumbnail_step_rejected() {
        let mut session = Session::new();
        session.advance(text("fmt"));
        session.advance(text("trig"));
        session.advance(SessionInput::Skip);
        assert!(matches!(
            session.advance(text("not a photo")),
            Advance::Rejected(SessionState::AwaitingThumbnail)
        ));
    }
}
