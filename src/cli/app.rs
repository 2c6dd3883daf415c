//! Server app runner

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api;
use crate::application::ports::{CompletionOracle, ConfigStore, OracleError};
use crate::application::AnalysisService;
use crate::domain::config::{AppConfig, ValidationMode};
use crate::domain::error::{ConfigError, ConfigurationError};
use crate::infrastructure::OpenAiOracle;

use super::signals::shutdown_signal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "audio_intercept_api=info,tower_http=info";

/// Errors that stop the server from starting or keep it from running
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create oracle client: {0}")]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServeError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(ConfigError::ValidationError { .. }) => EXIT_USAGE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Install the global tracing subscriber.
///
/// Honors `RUST_LOG`; falls back to [`DEFAULT_LOG_FILTER`]. Safe to call twice.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Build the environment layer of the config from a variable lookup.
///
/// Reads `OPENAI_API_KEY`, `HOST`, `PORT` and `OPENAI_BASE_URL`. Empty
/// values count as unset.
pub fn env_config_from<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let port = match get("PORT") {
        Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
            ConfigError::ValidationError {
                key: "PORT".to_string(),
                message: format!("\"{}\" is not a valid port number", raw),
            }
        })?),
        None => None,
    };

    Ok(AppConfig {
        api_key: get("OPENAI_API_KEY"),
        host: get("HOST"),
        port,
        api_base_url: get("OPENAI_BASE_URL"),
        ..Default::default()
    })
}

/// Environment layer of the config from the process environment
pub fn env_config() -> Result<AppConfig, ConfigError> {
    env_config_from(|name| env::var(name).ok())
}

/// Load and merge configuration.
///
/// Precedence: defaults < file < env < cli.
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;
    let env_config = env_config()?;

    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config);

    if let Some(raw) = config.validation.as_deref() {
        raw.parse::<ValidationMode>()
            .map_err(|e| ConfigError::ValidationError {
                key: "validation".to_string(),
                message: e.to_string(),
            })?;
    }

    Ok(config)
}

/// Build the analysis service from merged configuration.
///
/// Fails when no API key is configured or a route is left without a profile.
pub fn build_service(config: &AppConfig) -> Result<Arc<AnalysisService>, ServeError> {
    let api_key = config
        .api_key
        .clone()
        .ok_or(ConfigError::MissingApiKey)?;

    let mut oracle = OpenAiOracle::with_base_url(api_key, config.api_base_url_or_default());
    if let Some(secs) = config.oracle_timeout_secs {
        oracle = oracle.with_timeout(Duration::from_secs(secs))?;
    }
    let oracle: Arc<dyn CompletionOracle> = Arc::new(oracle);

    let service = AnalysisService::from_config(config, oracle);
    service.registry().ensure_complete()?;

    Ok(Arc::new(service))
}

/// Build the service and serve until a shutdown signal arrives
pub async fn run_server(config: AppConfig) -> ExitCode {
    match serve_with_config(config).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            error!(error = %e, "Server stopped");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn serve_with_config(config: AppConfig) -> Result<(), ServeError> {
    let service = build_service(&config)?;

    info!(
        validation = %service.mode(),
        base_url = %config.api_base_url_or_default(),
        "Starting audio intercept API"
    );

    api::serve(
        config.host_or_default(),
        config.port_or_default(),
        service,
        shutdown_signal(),
    )
    .await?;

    info!("Server stopped gracefully");
    Ok(())
}
