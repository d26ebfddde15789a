//! SQLite-backed rule store implementation.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::media::{ChannelId, UserId};
use crate::rules::{Rule, RuleError, RuleStore};

/// SQLite-backed rule store.
pub struct SqliteRuleStore {
    conn: Mutex<Connection>,
}

impl SqliteRuleStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn new(path: &Path) -> Result<Self, RuleError> {
        let conn = Connection::open(path).map_err(|e| RuleError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, RuleError> {
        let conn =
            Connection::open_in_memory().map_err(|e| RuleError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), RuleError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS rules (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                format TEXT NOT NULL,
                trigger_word TEXT NOT NULL,
                channels TEXT NOT NULL,
                thumb_path TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_rules_user_id ON rules(user_id);
            "#,
        )
        .map_err(|e| RuleError::Database(e.to_string()))?;
        Ok(())
    }

    fn row_to_rule(row: &rusqlite::Row) -> rusqlite::Result<Rule> {
        let format: String = row.get(0)?;
        let trigger: String = row.get(1)?;
        let channels_json: String = row.get(2)?;
        let thumb_path: Option<String> = row.get(3)?;
        let created_at_str: String = row.get(4)?;

        let channels: BTreeSet<ChannelId> =
            serde_json::from_str(&channels_json).unwrap_or_default();

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Rule {
            format,
            trigger,
            channels,
            thumb_path: thumb_path.map(Into::into),
            created_at,
        })
    }
}

impl RuleStore for SqliteRuleStore {
    fn append(&self, user: UserId, rule: Rule) -> Result<(), RuleError> {
        let channels_json = serde_json::to_string(&rule.channels)
            .map_err(|e| RuleError::Serialization(e.to_string()))?;

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO rules (user_id, format, trigger_word, channels, thumb_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.0,
                rule.format,
                rule.trigger,
                channels_json,
                rule.thumb_path.as_ref().map(|p| p.display().to_string()),
                rule.created_at.to_rfc3339(),
            ],
        )
        .map_err(|e| RuleError::Database(e.to_string()))?;
        Ok(())
    }

    fn list_all(&self, user: UserId) -> Result<Vec<Rule>, RuleError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT format, trigger_word, channels, thumb_path, created_at
                 FROM rules WHERE user_id = ?1 ORDER BY id ASC",
            )
            .map_err(|e| RuleError::Database(e.to_string()))?;

        let rules = stmt
            .query_map(params![user.0], Self::row_to_rule)
            .map_err(|e| RuleError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RuleError::Database(e.to_string()))?;

        Ok(rules)
    }

    fn clear(&self, user: UserId) -> Result<usize, RuleError> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute("DELETE FROM rules WHERE user_id = ?1", params![user.0])
            .map_err(|e| RuleError::Database(e.to_string()))?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_list_round_trip() {
        let store = SqliteRuleStore::in_memory().unwrap();
        let user = UserId(42);

        let rule = Rule::new("Naruto E{ep} {quality}", "naruto")
            .with_channels([ChannelId(-1001), ChannelId(-1002)])
            .with_thumbnail("/tmp/thumb.jpg");
        store.append(user, rule.clone()).unwrap();

        let rules = store.list_all(user).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].format, rule.format);
        assert_eq!(rules[0].trigger, rule.trigger);
        assert_eq!(rules[0].channels, rule.channels);
        assert_eq!(rules[0].thumb_path, rule.thumb_path);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let store = SqliteRuleStore::in_memory().unwrap();
        let user = UserId(1);
        for trigger in ["a", "b", "c"] {
            store.append(user, Rule::new("fmt", trigger)).unwrap();
        }
        let triggers: Vec<_> = store
            .list_all(user)
            .unwrap()
            .into_iter()
            .map(|r| r.trigger)
            .collect();
        assert_eq!(triggers, ["a", "b", "c"]);
    }

    #[test]
    fn test_clear_only_affects_one_user() {
        let store = SqliteRuleStore::in_memory().unwrap();
        store.append(UserId(1), Rule::new("f", "x")).unwrap();
        store.append(UserId(2), Rule::new("f", "y")).unwrap();

        assert_eq!(store.clear(UserId(1)).unwrap(), 1);
        assert!(store.list_all(UserId(1)).unwrap().is_empty());
        assert_eq!(store.list_all(UserId(2)).unwrap().len(), 1);
    }
}
