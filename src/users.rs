//! Process-wide registry of users who have started the bot.

use std::collections::HashSet;
use std::sync::Mutex;

use teloxide::types::UserId;

/// Append-only set of user ids
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Mutex<HashSet<UserId>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `user_id`; returns `true` the first time it is seen
    pub fn register(&self, user_id: UserId) -> bool {
        self.users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(user_id)
    }

    /// Number of distinct users seen so far
    pub fn count(&self) -> usize {
        self.users
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
