//! Per-user busy guards for long-running renders.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::media::UserId;

/// Tracks which users have a render in flight.
///
/// A second acquisition for the same user fails immediately instead of
/// queueing; the guard releases the user on drop, including on panic and
/// early return paths.
#[derive(Debug, Clone, Default)]
pub struct UserLocks {
    busy: Arc<Mutex<HashSet<UserId>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to mark the user busy. `None` means a render is already in
    /// flight for them.
    pub fn try_acquire(&self, user: UserId) -> Option<UserLockGuard> {
        let mut busy = self.busy.lock().unwrap();
        if busy.insert(user) {
            Some(UserLockGuard {
                user,
                busy: Arc::clone(&self.busy),
            })
        } else {
            None
        }
    }

    /// Whether the user currently holds a lock.
    pub fn is_busy(&self, user: UserId) -> bool {
        self.busy.lock().unwrap().contains(&user)
    }
}

/// RAII guard marking one user as busy.
#[derive(Debug)]
pub struct UserLockGuard {
    user: UserId,
    busy: Arc<Mutex<HashSet<UserId>>>,
}

impl Drop for UserLockGuard {
    fn drop(&mut self) {
        self.busy.lock().unwrap().remove(&self.user);
    }
}
