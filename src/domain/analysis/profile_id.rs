//! Analysis profile identifiers

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidProfileError;

/// All available profile IDs
pub const ALL_PROFILES: &[ProfileId] = &[ProfileId::Overview, ProfileId::Detailed];

/// Identifiers for the fixed analysis profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileId {
    /// Coarse assessment: threat level, sentiment, tags, key insights
    #[default]
    Overview,
    /// Exhaustive assessment with nested operational sections
    Detailed,
}

impl ProfileId {
    /// Get the HTTP route this profile is served on
    pub const fn route(&self) -> &'static str {
        match self {
            Self::Overview => "/generate-overview",
            Self::Detailed => "/generate-detailed-analysis",
        }
    }

    /// Get the model used when configuration does not override it
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Overview => "chatgpt-4o-latest",
            Self::Detailed => "gpt-4-turbo-preview",
        }
    }

    /// Get the string identifier for this profile
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Detailed => "detailed",
        }
    }

    /// Look up the profile served on a route
    pub fn from_route(route: &str) -> Option<Self> {
        ALL_PROFILES.iter().copied().find(|p| p.route() == route)
    }
}

impl FromStr for ProfileId {
    type Err = InvalidProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overview" => Ok(Self::Overview),
            "detailed" => Ok(Self::Detailed),
            _ => Err(InvalidProfileError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
