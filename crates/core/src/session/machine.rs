//! Session manager: owns the per-user session map and persists completed
//! rules.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::media::{ChannelId, UserId};
use crate::rules::{Rule, RuleError, RuleStore};
use crate::session::{Advance, Session, SessionInput, SessionState};

/// What happened when a user's input was fed into their session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// No session is active for this user; the input is not ours.
    NoSession,
    /// The dialog advanced; prompt for the given state.
    Prompt(SessionState),
    /// Input rejected; re-prompt for the given state.
    Rejected(SessionState),
    /// A target channel was recorded.
    ChannelAdded {
        channel: ChannelId,
        total: usize,
    },
    /// The dialog finished and the rule was appended to the store.
    Saved(Rule),
}

/// Drives the multi-step configuration dialog for every user.
///
/// The session map doubles as the per-user mutual-exclusion scope: all
/// reads and mutations happen under its lock, so two interleaved events
/// for the same user cannot produce a half-written session. This is also
/// the only writer to the rule store.
pub struct SessionManager {
    rules: Arc<dyn RuleStore>,
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl SessionManager {
    pub fn new(rules: Arc<dyn RuleStore>) -> Self {
        Self {
            rules,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Starts a fresh session, silently replacing any in-progress one.
    pub fn start(&self, user: UserId) {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.insert(user, Session::new()).is_some() {
            debug!(%user, "replaced in-progress configuration session");
        }
    }

    /// Discards the user's session. Returns whether one existed.
    pub fn cancel(&self, user: UserId) -> bool {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.remove(&user).is_some()
    }

    /// Whether a configuration dialog is currently active for the user.
    pub fn is_active(&self, user: UserId) -> bool {
        let sessions = self.sessions.lock().unwrap();
        sessions.contains_key(&user)
    }

    /// Current dialog state for the user, if a session is active.
    pub fn state(&self, user: UserId) -> Option<SessionState> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(&user).map(|s| s.state)
    }

    /// Feeds one classified input into the user's session.
    ///
    /// On completion the rule is appended to the store and the session
    /// discarded; if the append fails the session is kept so the user can
    /// retry the final step.
    pub fn advance(&self, user: UserId, input: SessionInput) -> Result<SessionEvent, RuleError> {
        let mut sessions = self.sessions.lock().unwrap();
        let Some(session) = sessions.get_mut(&user) else {
            return Ok(SessionEvent::NoSession);
        };

        match session.advance(input) {
            Advance::Next(state) => Ok(SessionEvent::Prompt(state)),
            Advance::Rejected(state) => Ok(SessionEvent::Rejected(state)),
            Advance::ChannelAdded(channel) => Ok(SessionEvent::ChannelAdded {
                channel,
                total: session.channels.len(),
            }),
            Advance::Finished(rule) => {
                self.rules.append(user, rule.clone())?;
                sessions.remove(&user);
                debug!(%user, trigger = %rule.trigger, "saved auto-rename rule");
                Ok(SessionEvent::Saved(rule))
            }
        }
    }
}
