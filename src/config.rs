use crate::error::{config::ConfigError, AppError};

const DEFAULT_LOG_CATEGORY_NAME: &str = "VCログ";

pub struct Config {
    pub discord_bot_token: String,

    /// The only guild whose voice activity is logged.
    pub guild_id: u64,

    /// Name of the category that groups the per-member log channels.
    pub log_category_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here with `std::env::var`; tests pass a closure over a map.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of the named variable, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and well-formed
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
        };

        let guild_id_raw = require("DISCORD_GUILD_ID")?;
        let guild_id = guild_id_raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidEnvVar {
                name: "DISCORD_GUILD_ID".to_string(),
                value: guild_id_raw.clone(),
                source,
            })?;

        Ok(Self {
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            guild_id,
            log_category_name: lookup("VC_LOG_CATEGORY_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_CATEGORY_NAME.to_string()),
        })
    }
}
