//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake.

use dioxus_logger::tracing;
use serenity::all::{Context, Ready};

use crate::service::voice_log::VoiceLogService;

/// Handles the ready event when the bot connects to Discord.
///
/// Logs the connected user and warns when the configured guild is not among the
/// guilds the bot was invited to, since no voice activity would ever be logged.
///
/// # Arguments
/// - `voice_log` - Voice log service holding the configured guild id
/// - `_ctx` - Discord context (unused)
/// - `ready` - Ready event data containing bot user and guild information
pub async fn handle_ready(voice_log: &VoiceLogService, _ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let guild_id = voice_log.guild_id();
    if !ready.guilds.iter().any(|guild| guild.id.get() == guild_id) {
        tracing::warn!(
            "Bot is not a member of the configured guild {}; no voice activity will be logged",
            guild_id
        );
    }
}
