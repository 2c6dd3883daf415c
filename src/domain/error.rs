//! Domain error types

use thiserror::Error;

/// Error when an unknown analysis profile is requested
#[derive(Debug, Clone, Error)]
#[error("Invalid profile: \"{input}\". Valid profiles are: overview, detailed")]
pub struct InvalidProfileError {
    pub input: String,
}

/// Error when an unknown validation mode is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid validation mode: \"{input}\". Valid modes are: passthrough, strict")]
pub struct InvalidValidationModeError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),

    #[error("Missing API key. Set OPENAI_API_KEY or configure via 'audio-intercept-api config set api_key <key>'")]
    MissingApiKey,
}

/// Error when a route has no bound analysis profile
#[derive(Debug, Clone, Error)]
#[error("No analysis profile is bound to route \"{route}\"")]
pub struct ConfigurationError {
    pub route: String,
}
