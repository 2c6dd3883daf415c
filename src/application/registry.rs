//! Prompt profile registry

use std::collections::HashMap;

use crate::domain::analysis::{ProfileId, PromptProfile, ALL_PROFILES};
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigurationError;

/// Fixed set of profiles, addressable by route. Built once at startup.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<ProfileId, PromptProfile>,
}

impl ProfileRegistry {
    /// Registry holding both profiles with the given models
    pub fn new(overview_model: impl Into<String>, detailed_model: impl Into<String>) -> Self {
        Self::with_profiles([
            PromptProfile::build(ProfileId::Overview, overview_model),
            PromptProfile::build(ProfileId::Detailed, detailed_model),
        ])
    }

    /// Registry using the models selected by configuration
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.model_for(ProfileId::Overview),
            config.model_for(ProfileId::Detailed),
        )
    }

    /// Registry holding exactly the given profiles
    pub fn with_profiles(profiles: impl IntoIterator<Item = PromptProfile>) -> Self {
        Self {
            profiles: profiles.into_iter().map(|p| (p.id(), p)).collect(),
        }
    }

    /// Resolve the profile bound to an HTTP route
    pub fn profile_for(&self, route: &str) -> Result<&PromptProfile, ConfigurationError> {
        ProfileId::from_route(route)
            .and_then(|id| self.profiles.get(&id))
            .ok_or_else(|| ConfigurationError {
                route: route.to_string(),
            })
    }

    /// Fail unless every known route resolves to a profile
    pub fn ensure_complete(&self) -> Result<(), ConfigurationError> {
        for id in ALL_PROFILES {
            self.profile_for(id.route())?;
        }
        Ok(())
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::from_config(&AppConfig::defaults())
    }
}
