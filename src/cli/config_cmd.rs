//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ModelsConfig, ValidationMode};
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    presenter.info("Set the API key with: audio-intercept-api config set api_key <key>");
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, display_value(key, value)));
    if key == "api_key" {
        presenter.warn("The API key is stored unencrypted; OPENAI_API_KEY takes precedence when set");
    }

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    presenter.output(&lookup_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &lookup_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "api_key" => config.api_key = Some(value.to_string()),
        "host" => config.host = Some(value.to_string()),
        "port" => {
            let port = value
                .parse::<u16>()
                .map_err(|_| invalid("Value must be a port number (0-65535)".to_string()))?;
            config.port = Some(port);
        }
        "api_base_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid("Value must start with http:// or https://".to_string()));
            }
            config.api_base_url = Some(value.to_string());
        }
        "validation" => {
            let mode = value
                .parse::<ValidationMode>()
                .map_err(|e| invalid(e.to_string()))?;
            config.validation = Some(mode.to_string());
        }
        "oracle_timeout_secs" => {
            let secs = value
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| invalid("Value must be a positive number of seconds".to_string()))?;
            config.oracle_timeout_secs = Some(secs);
        }
        "models.overview" | "models.detailed" => {
            if value.trim().is_empty() {
                return Err(invalid("Model identifier must not be empty".to_string()));
            }
            let models = config.models.get_or_insert_with(ModelsConfig::default);
            if key == "models.overview" {
                models.overview = Some(value.to_string());
            } else {
                models.detailed = Some(value.to_string());
            }
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

/// Current value of `key`, masked where it is a secret
fn lookup_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "api_key" => config.api_key.as_deref().map(mask_api_key),
        "host" => config.host.clone(),
        "port" => config.port.map(|p| p.to_string()),
        "api_base_url" => config.api_base_url.clone(),
        "validation" => config.validation.clone(),
        "oracle_timeout_secs" => config.oracle_timeout_secs.map(|s| s.to_string()),
        "models.overview" => config.models.as_ref().and_then(|m| m.overview.clone()),
        "models.detailed" => config.models.as_ref().and_then(|m| m.detailed.clone()),
        _ => None,
    }
}

fn display_value(key: &str, value: &str) -> String {
    if key == "api_key" {
        mask_api_key(value)
    } else {
        value.to_string()
    }
}

/// Mask API key for display (show first 4 and last 4 chars)
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
