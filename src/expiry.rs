//! # Message Expiry Module
//!
//! Deferred deletion of bot messages. Every scheduled deletion is a tokio task
//! tracked by `(chat id, message id)`, so a superseded message can have its
//! timer cancelled.
//!
//! # Behavior
//!
//! - A timer fires once, `delay` after scheduling
//! - Scheduling the same message again replaces its previous timer
//! - A firing timer only clears its own entry, never a replacement's
//! - A failed deletion (message already gone) is logged, never propagated

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::MessageId;
use tokio::task::{self, AbortHandle};
use tracing::debug;

type ExpiryKey = (ChatId, MessageId);

/// Cancellable per-message deletion timers
#[derive(Debug)]
pub struct MessageExpiry {
    delay: Duration,
    pending: Mutex<HashMap<ExpiryKey, AbortHandle>>,
}

impl MessageExpiry {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Delete `message_id` from `chat_id` once the delay has elapsed
    pub fn schedule_deletion(self: &Arc<Self>, bot: Bot, chat_id: ChatId, message_id: MessageId) {
        self.schedule_with(chat_id, message_id, move || async move {
            if let Err(e) = bot.delete_message(chat_id, message_id).await {
                debug!(
                    user_id = %chat_id,
                    message_id = message_id.0,
                    error = %e,
                    "Expired message was already gone"
                );
            }
        });
    }

    /// Run `action` for the message once the delay has elapsed
    pub fn schedule_with<F, Fut>(self: &Arc<Self>, chat_id: ChatId, message_id: MessageId, action: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let key = (chat_id, message_id);
        let delay = self.delay;
        let expiry = Arc::clone(self);

        // Hold the lock across spawn so the task cannot remove its entry first
        let mut pending = self.lock_pending();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            expiry.release(key, task::id());
            action().await;
        });

        if let Some(previous) = pending.insert(key, handle.abort_handle()) {
            previous.abort();
        }
    }

    /// Cancel the pending timer of a message; returns whether one was pending
    pub fn cancel(&self, chat_id: ChatId, message_id: MessageId) -> bool {
        match self.lock_pending().remove(&(chat_id, message_id)) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, chat_id: ChatId, message_id: MessageId) -> bool {
        self.lock_pending().contains_key(&(chat_id, message_id))
    }

    pub fn pending_count(&self) -> usize {
        self.lock_pending().len()
    }

    /// Drop the entry for `key` if it still belongs to task `task_id`
    fn release(&self, key: ExpiryKey, task_id: task::Id) -> bool {
        let mut pending = self.lock_pending();
        if pending.get(&key).is_some_and(|handle| handle.id() == task_id) {
            pending.remove(&key);
            true
        } else {
            false
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashMap<ExpiryKey, AbortHandle>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
