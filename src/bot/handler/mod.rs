use serenity::all::{Context, EventHandler, Ready, VoiceState};
use serenity::async_trait;

use crate::service::voice_log::VoiceLogService;

pub mod ready;
pub mod voice;

/// Discord bot event handler
pub struct Handler {
    pub voice_log: VoiceLogService,
    pub log_category_name: String,
}

impl Handler {
    pub fn new(voice_log: VoiceLogService, log_category_name: String) -> Self {
        Self {
            voice_log,
            log_category_name,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.voice_log, ctx, ready).await;
    }

    /// Called when a member joins, leaves, moves, or toggles mute/deafen in voice
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        voice::handle_voice_state_update(
            &self.voice_log,
            &self.log_category_name,
            ctx,
            old,
            new,
        )
        .await;
    }
}
