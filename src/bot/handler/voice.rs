//! Voice state event handler.
//!
//! Converts Serenity's voice state update into a `VoiceStateChange` and hands it to the
//! voice log service. Serenity supplies the previous state from its cache; when the
//! cache has no previous state (e.g. the member connected before the bot started) the
//! update is seen as a plain join.
//!
//! Channel names come from the cached guild when available, falling back to an HTTP
//! fetch and finally to the raw channel id.

use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{ChannelId, Context, GuildId, Mentionable, UserId, VoiceState};

use crate::{
    model::voice::{VoiceChannelRef, VoiceStateChange},
    service::{log_channel::DiscordLogSink, voice_log::VoiceLogService},
};

/// Returns whether the member's connected channel differs between the two states.
///
/// Mute, deafen, stream, and video toggles keep the same channel and need no log.
pub fn channel_changed(before: Option<ChannelId>, after: Option<ChannelId>) -> bool {
    before != after
}

/// Why a voice state update is dropped before any API lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The update carries no guild id
    NotInGuild,
    /// The update belongs to a guild other than the configured one
    UntrackedGuild(GuildId),
    /// The member stayed in the same channel (or in none)
    NoChannelChange,
}

/// Decides whether a voice state update needs member and channel lookups.
///
/// # Arguments
/// - `tracked_guild_id` - The configured guild
/// - `guild_id` - Guild of the update, if any
/// - `before` - Channel id from the previous state
/// - `after` - Channel id from the current state
///
/// # Returns
/// - `Ok(GuildId)` - The update belongs to the tracked guild and changes channel
/// - `Err(Skip)` - Reason the update is ignored
pub fn screen_update(
    tracked_guild_id: u64,
    guild_id: Option<GuildId>,
    before: Option<ChannelId>,
    after: Option<ChannelId>,
) -> Result<GuildId, Skip> {
    let guild_id = guild_id.ok_or(Skip::NotInGuild)?;

    if guild_id.get() != tracked_guild_id {
        return Err(Skip::UntrackedGuild(guild_id));
    }

    if !channel_changed(before, after) {
        return Err(Skip::NoChannelChange);
    }

    Ok(guild_id)
}

/// Builds the domain change from resolved member and channel data.
pub fn voice_state_change(
    guild_id: GuildId,
    user_id: UserId,
    is_bot: bool,
    display_name: &str,
    before: Option<VoiceChannelRef>,
    after: Option<VoiceChannelRef>,
) -> VoiceStateChange {
    VoiceStateChange {
        guild_id: guild_id.get(),
        user_id: user_id.get(),
        is_bot,
        mention: user_id.mention().to_string(),
        display_name: display_name.to_string(),
        before,
        after,
    }
}

/// Handles the voice_state_update event for a guild member.
///
/// Events outside the configured guild or without a channel change are dropped before
/// any API lookups. Errors writing the log are logged and do not affect later events.
///
/// # Arguments
/// - `voice_log` - Voice log service tracking sessions for the configured guild
/// - `log_category_name` - Category that holds the per-member log channels
/// - `ctx` - Discord context for cache and HTTP access
/// - `old` - Previous voice state from the cache, if known
/// - `new` - Current voice state
pub async fn handle_voice_state_update(
    voice_log: &VoiceLogService,
    log_category_name: &str,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let before_id = old.as_ref().and_then(|state| state.channel_id);
    let after_id = new.channel_id;

    let guild_id = match screen_update(voice_log.guild_id(), new.guild_id, before_id, after_id) {
        Ok(guild_id) => guild_id,
        Err(Skip::NoChannelChange) => return,
        Err(skip) => {
            tracing::debug!("Ignoring voice state update: {:?}", skip);
            return;
        }
    };

    let member = match new.member {
        Some(member) => member,
        None => match guild_id.member(&ctx, new.user_id).await {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch member {} in guild {} for voice state update: {:?}",
                    new.user_id,
                    guild_id,
                    e
                );
                return;
            }
        },
    };

    let before = match before_id {
        Some(channel_id) => Some(resolve_channel(&ctx, guild_id, channel_id).await),
        None => None,
    };
    let after = match after_id {
        Some(channel_id) => Some(resolve_channel(&ctx, guild_id, channel_id).await),
        None => None,
    };

    let change = voice_state_change(
        guild_id,
        member.user.id,
        member.user.bot,
        member.display_name(),
        before,
        after,
    );

    let sink = DiscordLogSink::new(ctx.http.clone(), log_category_name);

    match voice_log.handle(&change, Utc::now(), &sink).await {
        Ok(0) => {}
        Ok(sent) => tracing::debug!(
            "Logged {} voice line(s) for user {} in guild {}",
            sent,
            change.user_id,
            change.guild_id
        ),
        Err(e) => tracing::error!(
            "Failed to write voice log for user {} in guild {}: {:?}",
            change.user_id,
            change.guild_id,
            e
        ),
    }
}

async fn resolve_channel(
    ctx: &Context,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> VoiceChannelRef {
    let cached = ctx.cache.guild(guild_id).and_then(|guild| {
        guild
            .channels
            .get(&channel_id)
            .map(|channel| channel.name.clone())
    });

    let name = match cached {
        Some(name) => name,
        None => match channel_id.to_channel(ctx).await {
            Ok(channel) => channel
                .guild()
                .map(|channel| channel.name)
                .unwrap_or_else(|| channel_id.to_string()),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch channel {} in guild {}: {:?}",
                    channel_id,
                    guild_id,
                    e
                );
                channel_id.to_string()
            }
        },
    };

    VoiceChannelRef::new(channel_id.get(), name)
}
