//! In-memory profile store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::media::UserId;
use crate::profile::{ProfileError, ProfileStore};

#[derive(Debug, Clone, Default)]
struct Profile {
    thumbnail: Option<PathBuf>,
    title: Option<String>,
}

/// Profile store backed by a process-local map.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn set_thumbnail(&self, user: UserId, path: &Path) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.entry(user).or_default().thumbnail = Some(path.to_path_buf());
        Ok(())
    }

    fn thumbnail(&self, user: UserId) -> Result<Option<PathBuf>, ProfileError> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.get(&user).and_then(|p| p.thumbnail.clone()))
    }

    fn clear_thumbnail(&self, user: UserId) -> Result<Option<PathBuf>, ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .get_mut(&user)
            .and_then(|p| p.thumbnail.take()))
    }

    fn set_title(&self, user: UserId, title: &str) -> Result<(), ProfileError> {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.entry(user).or_default().title = Some(title.to_string());
        Ok(())
    }

    fn title(&self, user: UserId) -> Result<Option<String>, ProfileError> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.get(&user).and_then(|p| p.title.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_set_get_clear() {
        let store = MemoryProfileStore::new();
        let user = UserId(7);

        assert!(store.thumbnail(user).unwrap().is_none());
        store.set_thumbnail(user, Path::new("/tmp/a.jpg")).unwrap();
        assert_eq!(
            store.thumbnail(user).unwrap(),
            Some(PathBuf::from("/tmp/a.jpg"))
        );

        let removed = store.clear_thumbnail(user).unwrap();
        assert_eq!(removed, Some(PathBuf::from("/tmp/a.jpg")));
        assert!(store.thumbnail(user).unwrap().is_none());
    }

    #[test]
    fn test_title_is_independent_of_thumbnail() {
        let store = MemoryProfileStore::new();
        let user = UserId(7);
        store.set_title(user, "My Channel Rips").unwrap();
        store.clear_thumbnail(user).unwrap();
        assert_eq!(store.title(user).unwrap().as_deref(), Some("My Channel Rips"));
    }
}
