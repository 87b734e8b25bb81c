use dioxus_logger::tracing;
use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::handler::Handler, config::Config, error::AppError, service::voice_log::VoiceLogService,
};

/// Builds the Discord client with the voice log handler attached.
///
/// # Arguments
/// - `config` - Application configuration with the bot token and target guild
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError)` - Client construction failed (e.g. malformed token)
pub async fn init_bot(config: &Config) -> Result<Client, AppError> {
    // GUILD_MEMBERS is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(
        VoiceLogService::in_memory(config.guild_id),
        config.log_category_name.clone(),
    );

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Starts the Discord bot in a blocking manner
///
/// Connects to the gateway and processes events until the connection is closed or
/// authentication fails.
///
/// # Returns
/// - `Ok(())` if the bot shuts down cleanly
/// - `Err(AppError)` if connecting or authenticating fails
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
