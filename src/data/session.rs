//! Join timestamp storage keyed by member identity.
//!
//! Holds at most one timestamp per `MemberKey`. Nothing is persisted; a restart
//! forgets every open session, which later surfaces as an unknown stay duration.

use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::model::session::MemberKey;

/// Insert/remove access (plus `get` for inspection in tests) to recorded join timestamps.
///
/// Implementations must be safe to share between concurrently running event handlers.
/// Each call is atomic on its own; callers that need read-modify-write sequences
/// serialize per member themselves.
pub trait SessionStore: Send + Sync {
    /// Returns the recorded join time for a member, if any.
    #[cfg(test)]
    fn get(&self, key: &MemberKey) -> Option<DateTime<Utc>>;

    /// Stores a join time, returning the value it replaced.
    fn insert(&self, key: MemberKey, joined_at: DateTime<Utc>) -> Option<DateTime<Utc>>;

    /// Removes and returns the join time for a member.
    fn remove(&self, key: &MemberKey) -> Option<DateTime<Utc>>;
}

/// Process-local store backed by a mutex-guarded `HashMap`.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<MemberKey, DateTime<Utc>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members with an open session.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }

    // Poisoning is ignored: every access is a single get, insert, or remove.
    fn sessions(&self) -> MutexGuard<'_, HashMap<MemberKey, DateTime<Utc>>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for InMemorySessionStore {
    #[cfg(test)]
    fn get(&self, key: &MemberKey) -> Option<DateTime<Utc>> {
        self.sessions().get(key).copied()
    }

    fn insert(&self, key: MemberKey, joined_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.sessions().insert(key, joined_at)
    }

    fn remove(&self, key: &MemberKey) -> Option<DateTime<Utc>> {
        self.sessions().remove(key)
    }
}
