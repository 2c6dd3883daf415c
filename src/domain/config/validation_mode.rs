//! Validation mode value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidValidationModeError;

/// How oracle output is treated before it is returned to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationMode {
    /// Return the oracle text unmodified, whatever it contains
    #[default]
    Passthrough,
    /// Reject output that is not a JSON object matching the profile schema
    Strict,
}

impl ValidationMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Passthrough => "passthrough",
            Self::Strict => "strict",
        }
    }

    pub const fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl FromStr for ValidationMode {
    type Err = InvalidValidationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passthrough" => Ok(Self::Passthrough),
            "strict" => Ok(Self::Strict),
            _ => Err(InvalidValidationModeError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
