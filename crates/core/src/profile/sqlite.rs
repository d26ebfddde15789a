//! SQLite-backed profile store implementation.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use crate::media::UserId;
use crate::profile::{ProfileError, ProfileStore};

/// SQLite-backed profile store.
pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
}

impl SqliteProfileStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn new(path: &Path) -> Result<Self, ProfileError> {
        let conn =
            Connection::open(path).map_err(|e| ProfileError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Creates an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, ProfileError> {
        let conn =
            Connection::open_in_memory().map_err(|e| ProfileError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), ProfileError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id INTEGER PRIMARY KEY,
                thumb_path TEXT,
                title TEXT
            );
            "#,
        )
        .map_err(|e| ProfileError::Database(e.to_string()))?;
        Ok(())
    }

    fn get_column<T: rusqlite::types::FromSql>(
        &self,
        user: UserId,
        column: &str,
    ) -> Result<Option<T>, ProfileError> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            &format!("SELECT {} FROM profiles WHERE user_id = ?1", column),
            params![user.0],
            |row| row.get::<_, Option<T>>(0),
        )
        .optional()
        .map(|v| v.flatten())
        .map_err(|e| ProfileError::Database(e.to_string()))
    }
}

impl ProfileStore for SqliteProfileStore {
    fn set_thumbnail(&self, user: UserId, path: &Path) -> Result<(), ProfileError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO profiles (user_id, thumb_path) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET thumb_path = excluded.thumb_path",
            params![user.0, path.display().to_string()],
        )
        .map_err(|e| ProfileError::Database(e.to_string()))?;
        Ok(())
    }

    fn thumbnail(&self, user: UserId) -> Result<Option<PathBuf>, ProfileError> {
        Ok(self
            .get_column::<String>(user, "thumb_path")?
            .map(PathBuf::from))
    }

    fn clear_thumbnail(&self, user: UserId) -> Result<Option<PathBuf>, ProfileError> {
        let previous = self.thumbnail(user)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE profiles SET thumb_path = NULL WHERE user_id = ?1",
            params![user.0],
        )
        .map_err(|e| ProfileError::Database(e.to_string()))?;
        Ok(previous)
    }

    fn set_title(&self, user: UserId, title: &str) -> Result<(), ProfileError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO profiles (user_id, title) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET title = excluded.title",
            params![user.0, title],
        )
        .map_err(|e| ProfileError::Database(e.to_string()))?;
        Ok(())
    }

    fn title(&self, user: UserId) -> Result<Option<String>, ProfileError> {
        self.get_column::<String>(user, "title")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_round_trip() {
        let store = SqliteProfileStore::in_memory().unwrap();
        let user = UserId(9);

        assert!(store.thumbnail(user).unwrap().is_none());
        store.set_thumbnail(user, Path::new("/tmp/t.jpg")).unwrap();
        assert_eq!(
            store.thumbnail(user).unwrap(),
            Some(PathBuf::from("/tmp/t.jpg"))
        );
    }

    #[test]
    fn test_set_thumbnail_overwrites() {
        let store = SqliteProfileStore::in_memory().unwrap();
        let user = UserId(9);
        store.set_thumbnail(user, Path::new("/tmp/a.jpg")).unwrap();
        store.set_thumbnail(user, Path::new("/tmp/b.jpg")).unwrap();
        assert_eq!(
            store.thumbnail(user).unwrap(),
            Some(PathBuf::from("/tmp/b.jpg"))
        );
    }

    #[test]
    fn test_clear_returns_previous_and_keeps_title() {
        let store = SqliteProfileStore::in_memory().unwrap();
        let user = UserId(9);
        store.set_thumbnail(user, Path::new("/tmp/a.jpg")).unwrap();
        store.set_title(user, "Rips").unwrap();

        let removed = store.clear_thumbnail(user).unwrap();
        assert_eq!(removed, Some(PathBuf::from("/tmp/a.jpg")));
        assert!(store.thumbnail(user).unwrap().is_none());
        assert_eq!(store.title(user).unwrap().as_deref(), Some("Rips"));
    }

    #[test]
    fn test_clear_without_profile_is_none() {
        let store = SqliteProfileStore::in_memory().unwrap();
        assert!(store.clear_thumbnail(UserId(1)).unwrap().is_none());
    }
}
