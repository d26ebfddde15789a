//! Rule storage trait.

use thiserror::Error;

use crate::media::UserId;
use crate::rules::Rule;

/// Error type for rule store operations.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("database error: {0}")]
    Database(String),
    #[error("failed to serialize rule: {0}")]
    Serialization(String),
}

/// Per-user ordered rule storage.
///
/// Insertion order is semantically significant: the matcher walks rules
/// first to last, so earlier-configured rules win on overlapping triggers.
/// There is deliberately no per-rule deletion and no in-place edit.
pub trait RuleStore: Send + Sync {
    /// Appends a rule to the end of the user's list.
    fn append(&self, user: UserId, rule: Rule) -> Result<(), RuleError>;

    /// Returns the user's rules in insertion order.
    fn list_all(&self, user: UserId) -> Result<Vec<Rule>, RuleError>;

    /// Removes every rule of the user, returning how many were removed.
    fn clear(&self, user: UserId) -> Result<usize, RuleError>;
}
