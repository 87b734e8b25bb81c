//! Voice log orchestration.
//!
//! Turns a member's voice state change into ordered log lines and delivers them. The
//! decision steps are synchronous: `screen` classifies the change and `plan` also updates
//! the session tracker and composes messages. `handle` runs them and the delivery for one
//! member under that member's lock, so two events for the same member never interleave while
//! events for different members proceed concurrently.
//!
//! For a move, the leave line for the origin channel is composed and sent before the
//! join line for the destination, since the stay duration has to be read before the
//! join overwrites the tracker entry.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    data::session::{InMemorySessionStore, SessionStore},
    error::AppError,
    model::{
        session::{MemberKey, StayDuration},
        voice::{Transition, VoiceStateChange},
    },
    service::{
        duration::format_duration, log_channel::LogSink, session::SessionTracker,
        transition::classify,
    },
};

pub const UNKNOWN_STAY: &str = "不明（入室時刻の記録なし）";

pub fn join_message(mention: &str, channel_name: &str) -> String {
    format!("✅ {mention} が **{channel_name}** に参加しました。")
}

pub fn leave_message(mention: &str, channel_name: &str, stay: StayDuration) -> String {
    let stay = match stay {
        StayDuration::Known(duration) => format_duration(duration),
        StayDuration::Unknown => UNKNOWN_STAY.to_string(),
    };

    format!("❌ {mention} が **{channel_name}** から退出しました。\n　滞在時間: {stay}")
}

pub struct VoiceLogService<S = InMemorySessionStore> {
    /// The only guild whose events are logged
    guild_id: u64,
    tracker: SessionTracker<S>,
    locks: MemberLocks,
}

impl VoiceLogService<InMemorySessionStore> {
    pub fn in_memory(guild_id: u64) -> Self {
        Self::new(guild_id, InMemorySessionStore::new())
    }
}

impl<S: SessionStore> VoiceLogService<S> {
    pub fn new(guild_id: u64, store: S) -> Self {
        Self {
            guild_id,
            tracker: SessionTracker::new(store),
            locks: MemberLocks::default(),
        }
    }

    pub fn guild_id(&self) -> u64 {
        self.guild_id
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &SessionTracker<S> {
        &self.tracker
    }

    /// Classifies a voice state change without touching the tracker.
    ///
    /// Events from other guilds and from bot accounts are ignored.
    ///
    /// # Returns
    /// - `Some(Transition)` - The change needs a log entry
    /// - `None` - Nothing to log
    pub fn screen(&self, change: &VoiceStateChange) -> Option<Transition> {
        if change.guild_id != self.guild_id {
            tracing::debug!(
                "Ignoring voice state update from untracked guild {}",
                change.guild_id
            );
            return None;
        }

        if change.is_bot {
            tracing::debug!("Ignoring voice state update for bot user {}", change.user_id);
            return None;
        }

        match classify(change.before.as_ref(), change.after.as_ref()) {
            Transition::NoChange => None,
            transition => Some(transition),
        }
    }

    /// Applies a classified transition to the tracker and composes its log lines.
    ///
    /// The leave half is applied before the join half, so a move reads the stay duration
    /// before the join overwrites the record.
    fn apply(
        &self,
        change: &VoiceStateChange,
        transition: &Transition,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let key = change.key();
        let mut lines = Vec::with_capacity(2);

        if let Some(channel) = transition.left() {
            let stay = self.tracker.consume_leave(key, now);
            lines.push(leave_message(&change.mention, &channel.name, stay));
        }

        if let Some(channel) = transition.joined() {
            self.tracker.record_join(key, now);
            lines.push(join_message(&change.mention, &channel.name));
        }

        lines
    }

    /// Applies a voice state change to the tracker and composes its log lines.
    ///
    /// # Arguments
    /// - `change` - The member's voice presence before and after the event
    /// - `now` - Time the event is handled, used for both join and leave bookkeeping
    ///
    /// # Returns
    /// - Zero, one, or two lines; a leave line always precedes a join line
    pub fn plan(&self, change: &VoiceStateChange, now: DateTime<Utc>) -> Vec<String> {
        match self.screen(change) {
            Some(transition) => self.apply(change, &transition, now),
            None => Vec::new(),
        }
    }

    /// Delivers a voice state change to the member's log.
    ///
    /// Holds the member's lock from classification until the last line is posted. The
    /// log channel is resolved before the tracker is touched, so a resolution failure
    /// leaves the member's session intact. A failed post stops delivery of the remaining
    /// lines; tracker updates for the event are kept.
    ///
    /// # Arguments
    /// - `change` - The member's voice presence before and after the event
    /// - `now` - Time the event is handled
    /// - `sink` - Destination for the composed lines
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of lines delivered (zero when the change needs no log)
    /// - `Err(AppError)` - The sink failed to resolve the log channel or post a line
    pub async fn handle<L>(
        &self,
        change: &VoiceStateChange,
        now: DateTime<Utc>,
        sink: &L,
    ) -> Result<usize, AppError>
    where
        L: LogSink + ?Sized,
    {
        let member_lock = self.locks.acquire(change.key());
        let _guard = member_lock.mutex.lock().await;

        let Some(transition) = self.screen(change) else {
            return Ok(0);
        };

        let channel = sink.resolve(&change.target()).await?;

        let lines = self.apply(change, &transition, now);
        for line in &lines {
            sink.post(&channel, line).await?;
        }

        Ok(lines.len())
    }
}

/// One async mutex per member with an event in flight.
///
/// Entries are dropped once no handler holds or waits on them.
#[derive(Default)]
struct MemberLocks {
    locks: Mutex<HashMap<MemberKey, Arc<tokio::sync::Mutex<()>>>>,
}

/// A handle on one member's mutex; removes the map entry on drop when it is the last one.
///
/// Dropping also covers a cancelled `handle` future still waiting on the mutex.
struct MemberLock<'a> {
    locks: &'a MemberLocks,
    key: MemberKey,
    mutex: Arc<tokio::sync::Mutex<()>>,
}

impl Drop for MemberLock<'_> {
    fn drop(&mut self) {
        self.locks.release(&self.key);
    }
}

impl MemberLocks {
    fn acquire(&self, key: MemberKey) -> MemberLock<'_> {
        let mutex = self.locks().entry(key).or_default().clone();
        MemberLock {
            locks: self,
            key,
            mutex,
        }
    }

    // Clones are only taken under the map lock, so a count of two (map and the
    // releasing handle) means nobody else holds or waits on the mutex.
    fn release(&self, key: &MemberKey) {
        let mut locks = self.locks();
        if locks
            .get(key)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 2)
        {
            locks.remove(key);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks().len()
    }

    fn locks(&self) -> MutexGuard<'_, HashMap<MemberKey, Arc<tokio::sync::Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test;
