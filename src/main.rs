//! Audio Intercept API entry point

use std::process::ExitCode;

use clap::Parser;

use audio_intercept_api::cli::{
    app::{init_tracing, load_merged_config, run_server},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    EXIT_ERROR, EXIT_USAGE_ERROR,
};
use audio_intercept_api::domain::error::ConfigError;
use audio_intercept_api::infrastructure::XdgConfigStore;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    let store = match cli.config.as_ref() {
        Some(path) => XdgConfigStore::with_path(path),
        None => XdgConfigStore::new(),
    };

    if let Some(Commands::Config { action }) = cli.command {
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    init_tracing();

    let config = match load_merged_config(&store, cli.serve.to_config()).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            let code = match e {
                ConfigError::ValidationError { .. } => EXIT_USAGE_ERROR,
                _ => EXIT_ERROR,
            };
            return ExitCode::from(code);
        }
    };

    if config.api_key.is_none() {
        presenter.error(&ConfigError::MissingApiKey.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    run_server(config).await
}
