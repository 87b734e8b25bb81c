//! Error types for the voice log bot.
//!
//! `AppError` is the top-level error type that wraps domain-specific errors. Startup
//! errors propagate out of `main`; errors raised while handling a gateway event are
//! logged by the event handler and never terminate the bot.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
