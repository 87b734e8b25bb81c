mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;

use dioxus_logger::tracing::{self, Level};

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {e}");
    }

    let config = Config::from_env()?;

    tracing::info!(
        "Logging voice activity for guild {} under category {}",
        config.guild_id,
        config.log_category_name
    );

    let client = bot::start::init_bot(&config).await?;
    bot::start::start_bot(client).await?;

    Ok(())
}
