//! TOML config file store under the user config directory

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, ValidationMode};
use crate::domain::error::ConfigError;

/// Directory name under the user config dir
const APP_DIR: &str = "audio-intercept-api";

/// Written above the serialized values on every save
const FILE_HEADER: &str = "\
# audio-intercept-api configuration
# OPENAI_API_KEY, HOST, PORT and OPENAI_BASE_URL override these values,
# and command-line flags override both.
";

/// Config file store.
///
/// The file may hold the provider API key, so saves go through a temporary
/// sibling and are renamed into place, owner-readable only on Unix.
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Store at `$XDG_CONFIG_HOME/audio-intercept-api/config.toml`
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR);

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Store at an explicit path (`--config`)
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse file content and reject values the server could not start with
    fn decode(content: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if let Some(mode) = config.validation.as_deref() {
            mode.parse::<ValidationMode>()
                .map_err(|e| ConfigError::ValidationError {
                    key: "validation".to_string(),
                    message: e.to_string(),
                })?;
        }

        if let Some(url) = config.api_base_url.as_deref() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    key: "api_base_url".to_string(),
                    message: format!("\"{}\" must start with http:// or https://", url),
                });
            }
        }

        Ok(config)
    }

    fn encode(config: &AppConfig) -> Result<String, ConfigError> {
        let body =
            toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Ok(format!("{}\n{}", FILE_HEADER, body))
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "config.toml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    #[cfg(unix)]
    async fn restrict_permissions(path: &Path) -> Result<(), ConfigError> {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    #[cfg(not(unix))]
    async fn restrict_permissions(_path: &Path) -> Result<(), ConfigError> {
        Ok(())
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            debug!(path = %self.path.display(), "No config file, using empty config");
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config = Self::decode(&content)?;
        debug!(path = %self.path.display(), "Loaded config file");
        Ok(config)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::encode(config)?;
        let staging = self.staging_path();

        fs::write(&staging, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        Self::restrict_permissions(&staging).await?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        debug!(path = %self.path.display(), "Saved config file");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}
