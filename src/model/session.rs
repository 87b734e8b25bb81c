use chrono::Duration;

/// Identity of a tracked member: the guild they are in and their user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub guild_id: u64,
    pub user_id: u64,
}

impl MemberKey {
    pub fn new(guild_id: u64, user_id: u64) -> Self {
        Self { guild_id, user_id }
    }
}

/// How long a member stayed in voice, as far as the bot observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayDuration {
    /// Elapsed time between the recorded join and the leave. Never negative.
    Known(Duration),
    /// No join was recorded, e.g. the member was connected before the bot started.
    Unknown,
}
