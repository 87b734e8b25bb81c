use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The bot requires this environment variable to be defined. Check the `.env`
    /// file or the process environment.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but cannot be parsed.
    #[error("Invalid value '{value}' for environment variable {name}: {source}")]
    InvalidEnvVar {
        /// Name of the offending variable
        name: String,
        /// The raw value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },
}
