use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;

use crate::{
    data::session::{InMemorySessionStore, SessionStore},
    model::session::{MemberKey, StayDuration},
};

/// Tracks when each member last joined voice and measures their stay on leave.
pub struct SessionTracker<S = InMemorySessionStore> {
    store: S,
}

impl<S: SessionStore> SessionTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records a join, replacing any timestamp already held for the member.
    ///
    /// A second join without an intervening leave restarts the timer.
    pub fn record_join(&self, key: MemberKey, joined_at: DateTime<Utc>) {
        if let Some(previous) = self.store.insert(key, joined_at) {
            tracing::debug!(
                "Replaced join time {} for user {} in guild {}",
                previous,
                key.user_id,
                key.guild_id
            );
        }
    }

    /// Consumes the member's join record and returns how long they stayed.
    ///
    /// # Arguments
    /// - `key` - Member leaving voice
    /// - `left_at` - Time of the leave
    ///
    /// # Returns
    /// - `StayDuration::Known` - Elapsed time since the recorded join, clamped at zero
    /// - `StayDuration::Unknown` - No join was recorded for this member
    pub fn consume_leave(&self, key: MemberKey, left_at: DateTime<Utc>) -> StayDuration {
        match self.store.remove(&key) {
            Some(joined_at) => StayDuration::Known((left_at - joined_at).max(Duration::zero())),
            None => StayDuration::Unknown,
        }
    }

    #[cfg(test)]
    pub fn joined_at(&self, key: &MemberKey) -> Option<DateTime<Utc>> {
        self.store.get(key)
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl Default for SessionTracker<InMemorySessionStore> {
    fn default() -> Self {
        Self::new(InMemorySessionStore::new())
    }
}
