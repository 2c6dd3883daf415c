//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::config::{AppConfig, ValidationMode};

/// Audio Intercept API - LLM-backed structured analysis of radio transcripts
#[derive(Parser, Debug)]
#[command(name = "audio-intercept-api")]
#[command(version)]
#[command(about = "HTTP service that turns radio-intercept transcripts into structured analysis")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub serve: ServeArgs,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Server options; they override file and environment settings
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Address to bind (default: 0.0.0.0)
    #[arg(long, value_name = "ADDR")]
    pub host: Option<String>,

    /// Port to listen on (default: $PORT or 10000)
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Answer 502 when oracle output does not match the profile schema
    #[arg(long)]
    pub strict: bool,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Per-call oracle timeout in seconds (default: no timeout)
    #[arg(long, value_name = "SECS")]
    pub oracle_timeout: Option<u64>,
}

impl ServeArgs {
    /// Partial config holding only what was given on the command line
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            api_base_url: self.api_base_url.clone(),
            validation: self
                .strict
                .then(|| ValidationMode::Strict.to_string()),
            oracle_timeout_secs: self.oracle_timeout,
            ..Default::default()
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_key",
    "host",
    "port",
    "api_base_url",
    "validation",
    "oracle_timeout_secs",
    "models.overview",
    "models.detailed",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
