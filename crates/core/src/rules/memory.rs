//! In-memory rule store. Rules are lost on restart.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::media::UserId;
use crate::rules::{Rule, RuleError, RuleStore};

/// Rule store backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: Mutex<HashMap<UserId, Vec<Rule>>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleStore for MemoryRuleStore {
    fn append(&self, user: UserId, rule: Rule) -> Result<(), RuleError> {
        let mut rules = self.rules.lock().unwrap();
        rules.entry(user).or_default().push(rule);
        Ok(())
    }

    fn list_all(&self, user: UserId) -> Result<Vec<Rule>, RuleError> {
        let rules = self.rules.lock().unwrap();
        Ok(rules.get(&user).cloned().unwrap_or_default())
    }

    fn clear(&self, user: UserId) -> Result<usize, RuleError> {
        let mut rules = self.rules.lock().unwrap();
        Ok(rules.remove(&user).map(|r| r.len()).unwrap_or(0))
    }
}
