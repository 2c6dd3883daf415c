//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::analysis::ProfileId;

use super::validation_mode::ValidationMode;

/// Default port when neither file, environment nor CLI sets one
pub const DEFAULT_PORT: u16 = 10000;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default base URL of the OpenAI-compatible completion API
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Per-profile model overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsConfig {
    pub overview: Option<String>,
    pub detailed: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_base_url: Option<String>,
    pub validation: Option<String>,
    pub oracle_timeout_secs: Option<u64>,
    pub models: Option<ModelsConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            validation: Some(ValidationMode::default().to_string()),
            oracle_timeout_secs: None,
            models: Some(ModelsConfig {
                overview: Some(ProfileId::Overview.default_model().to_string()),
                detailed: Some(ProfileId::Detailed.default_model().to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            host: other.host.or(self.host),
            port: other.port.or(self.port),
            api_base_url: other.api_base_url.or(self.api_base_url),
            validation: other.validation.or(self.validation),
            oracle_timeout_secs: other.oracle_timeout_secs.or(self.oracle_timeout_secs),
            models: Self::merge_models(self.models, other.models),
        }
    }

    fn merge_models(
        base: Option<ModelsConfig>,
        other: Option<ModelsConfig>,
    ) -> Option<ModelsConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(ModelsConfig {
                overview: o.overview.or(b.overview),
                detailed: o.detailed.or(b.detailed),
            }),
        }
    }

    /// Get host, or 0.0.0.0 if not set
    pub fn host_or_default(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Get port, or 10000 if not set
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn api_base_url_or_default(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Get validation mode, or passthrough if not set/invalid
    pub fn validation_or_default(&self) -> ValidationMode {
        self.validation
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the model configured for a profile, or the profile's own default
    pub fn model_for(&self, profile: ProfileId) -> &str {
        self.models
            .as_ref()
            .and_then(|m| match profile {
                ProfileId::Overview => m.overview.as_deref(),
                ProfileId::Detailed => m.detailed.as_deref(),
            })
            .unwrap_or(profile.default_model())
    }
}
