//! Per-member log channel resolution and message delivery.
//!
//! Each tracked member gets a private text channel named `vc-log-<user id>` inside a
//! shared category. The category and the channel are created on first use; afterwards
//! they are found again by name. The member can read their own log but not write to
//! it, and `@everyone` cannot see it at all.

use dioxus_logger::tracing;
use serenity::{
    all::{
        ChannelId, ChannelType, CreateChannel, CreateMessage, GuildChannel, GuildId,
        PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
    },
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::{error::AppError, model::voice::LogTarget};

/// Destination for voice log lines.
///
/// Delivery is split in two so callers can find the destination before committing to
/// anything that depends on the delivery succeeding.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Where resolved lines are posted, e.g. a channel id.
    type Channel: Send + Sync;

    /// Finds or creates the target member's log destination.
    async fn resolve(&self, target: &LogTarget) -> Result<Self::Channel, AppError>;

    /// Posts a single line to a resolved destination.
    async fn post(&self, channel: &Self::Channel, content: &str) -> Result<(), AppError>;
}

/// The subset of a guild channel needed to find existing log channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelType,
    pub parent_id: Option<ChannelId>,
}

impl From<&GuildChannel> for ChannelSummary {
    fn from(channel: &GuildChannel) -> Self {
        Self {
            id: channel.id,
            name: channel.name.clone(),
            kind: channel.kind,
            parent_id: channel.parent_id,
        }
    }
}

pub fn log_channel_name(user_id: u64) -> String {
    format!("vc-log-{user_id}")
}

pub fn log_channel_topic(display_name: &str) -> String {
    format!("{display_name} のVCログ")
}

/// Finds the category holding log channels by exact name.
pub fn find_category(channels: &[ChannelSummary], category_name: &str) -> Option<ChannelId> {
    channels
        .iter()
        .find(|channel| channel.kind == ChannelType::Category && channel.name == category_name)
        .map(|channel| channel.id)
}

/// Finds a member's log channel among the text channels of a category.
///
/// A channel with the right name outside the category does not count.
pub fn find_log_channel(
    channels: &[ChannelSummary],
    category_id: ChannelId,
    channel_name: &str,
) -> Option<ChannelId> {
    channels
        .iter()
        .find(|channel| {
            channel.kind == ChannelType::Text
                && channel.parent_id == Some(category_id)
                && channel.name == channel_name
        })
        .map(|channel| channel.id)
}

/// Permission overwrites for a new log channel.
///
/// # Arguments
/// - `guild_id` - Guild the channel is created in; its id doubles as the `@everyone` role id
/// - `user_id` - Member the log belongs to (read-only access)
/// - `bot_id` - The bot's own user (read and write access)
pub fn log_channel_overwrites(
    guild_id: GuildId,
    user_id: UserId,
    bot_id: UserId,
) -> Vec<PermissionOverwrite> {
    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL,
            deny: Permissions::SEND_MESSAGES,
            kind: PermissionOverwriteType::Member(user_id),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot_id),
        },
    ]
}

/// Log sink that writes to per-member Discord text channels.
pub struct DiscordLogSink {
    /// Discord HTTP client for channel lookups, creation, and messages
    http: Arc<Http>,
    /// Name of the category that groups log channels
    category_name: String,
}

impl DiscordLogSink {
    /// Creates a new DiscordLogSink instance.
    ///
    /// # Arguments
    /// - `http` - Arc-wrapped Discord HTTP client for API requests
    /// - `category_name` - Name of the category holding the log channels
    pub fn new(http: Arc<Http>, category_name: impl Into<String>) -> Self {
        Self {
            http,
            category_name: category_name.into(),
        }
    }

    /// Returns the member's log channel, creating it and its category if needed.
    ///
    /// # Arguments
    /// - `target` - Member whose log channel is resolved
    ///
    /// # Returns
    /// - `Ok(ChannelId)` - Existing or newly created log channel
    /// - `Err(AppError::DiscordErr)` - Fetching guild channels or creating a channel failed
    pub async fn resolve_log_channel(&self, target: &LogTarget) -> Result<ChannelId, AppError> {
        let guild_id = GuildId::new(target.guild_id);
        let channels: Vec<ChannelSummary> = guild_id
            .channels(&self.http)
            .await?
            .values()
            .map(ChannelSummary::from)
            .collect();

        let category_id = match find_category(&channels, &self.category_name) {
            Some(id) => id,
            None => self.create_category(guild_id).await?,
        };

        let channel_name = log_channel_name(target.user_id);
        if let Some(id) = find_log_channel(&channels, category_id, &channel_name) {
            return Ok(id);
        }

        self.create_log_channel(guild_id, category_id, &channel_name, target)
            .await
    }

    async fn create_category(&self, guild_id: GuildId) -> Result<ChannelId, AppError> {
        let category = guild_id
            .create_channel(
                &self.http,
                CreateChannel::new(&self.category_name).kind(ChannelType::Category),
            )
            .await?;

        tracing::info!(
            "Created log category {} ({}) in guild {}",
            category.name,
            category.id,
            guild_id
        );

        Ok(category.id)
    }

    async fn create_log_channel(
        &self,
        guild_id: GuildId,
        category_id: ChannelId,
        channel_name: &str,
        target: &LogTarget,
    ) -> Result<ChannelId, AppError> {
        let bot_id = self.http.get_current_user().await?.id;
        let overwrites = log_channel_overwrites(guild_id, UserId::new(target.user_id), bot_id);

        let channel = guild_id
            .create_channel(
                &self.http,
                CreateChannel::new(channel_name)
                    .kind(ChannelType::Text)
                    .category(category_id)
                    .topic(log_channel_topic(&target.display_name))
                    .permissions(overwrites),
            )
            .await?;

        tracing::info!(
            "Created log channel {} for user {} in guild {}",
            channel.name,
            target.user_id,
            guild_id
        );

        Ok(channel.id)
    }
}

#[async_trait]
impl LogSink for DiscordLogSink {
    type Channel = ChannelId;

    async fn resolve(&self, target: &LogTarget) -> Result<ChannelId, AppError> {
        self.resolve_log_channel(target).await
    }

    async fn post(&self, channel: &ChannelId, content: &str) -> Result<(), AppError> {
        channel
            .send_message(&self.http, CreateMessage::new().content(content))
            .await?;
        Ok(())
    }
}
