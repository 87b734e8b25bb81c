use crate::model::session::MemberKey;

/// A voice channel as seen in a voice state update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceChannelRef {
    pub id: u64,
    pub name: String,
}

impl VoiceChannelRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One member's voice presence before and after a gateway event.
#[derive(Debug, Clone)]
pub struct VoiceStateChange {
    pub guild_id: u64,
    pub user_id: u64,
    pub is_bot: bool,
    /// Mention string for the member, e.g. `<@123>`
    pub mention: String,
    /// Guild display name, used for the log channel topic
    pub display_name: String,
    pub before: Option<VoiceChannelRef>,
    pub after: Option<VoiceChannelRef>,
}

impl VoiceStateChange {
    pub fn key(&self) -> MemberKey {
        MemberKey::new(self.guild_id, self.user_id)
    }

    pub fn target(&self) -> LogTarget {
        LogTarget {
            guild_id: self.guild_id,
            user_id: self.user_id,
            display_name: self.display_name.clone(),
        }
    }
}

/// The member whose log channel receives a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub guild_id: u64,
    pub user_id: u64,
    pub display_name: String,
}

/// Classification of a voice state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Joined(VoiceChannelRef),
    Left(VoiceChannelRef),
    Moved {
        from: VoiceChannelRef,
        to: VoiceChannelRef,
    },
    /// Same channel (mute, deafen, stream toggles) or no channel on either side.
    NoChange,
}

impl Transition {
    /// The channel the member left, including the origin of a move.
    pub fn left(&self) -> Option<&VoiceChannelRef> {
        match self {
            Self::Left(channel) | Self::Moved { from: channel, .. } => Some(channel),
            Self::Joined(_) | Self::NoChange => None,
        }
    }

    /// The channel the member entered, including the destination of a move.
    pub fn joined(&self) -> Option<&VoiceChannelRef> {
        match self {
            Self::Joined(channel) | Self::Moved { to: channel, .. } => Some(channel),
            Self::Left(_) | Self::NoChange => None,
        }
    }
}
