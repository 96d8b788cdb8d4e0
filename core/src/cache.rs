//! The presence cache: the set of users seen in the last successful cycle.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use presence_common::fingerprint::UserId;

/// Readers never observe a half-built set: a cycle's result is swapped in
/// under one write lock by [`PresenceCache::replace`].
#[derive(Debug, Default)]
pub struct PresenceCache {
    online: RwLock<HashSet<UserId>>,
}

impl PresenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_present(&self, user: UserId) {
        self.online
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user);
    }

    pub fn clear(&self) {
        self.online
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Replaces the whole set in one step.
    pub fn replace<I>(&self, users: I)
    where
        I: IntoIterator<Item = UserId>,
    {
        let next: HashSet<UserId> = users.into_iter().collect();
        *self.online.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn is_present(&self, user: UserId) -> bool {
        self.online
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&user)
    }

    /// Snapshot of present users, sorted.
    pub fn online(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self
            .online
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect();
        users.sort_unstable();
        users
    }

    pub fn len(&self) -> usize {
        self.online.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
