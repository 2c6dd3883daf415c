//! Domain layer - Core business logic
//!
//! Contains value objects (profiles, schemas, reports, configuration)
//! and domain errors. This layer has no dependencies on external systems.

pub mod analysis;
pub mod config;
pub mod error;

// Re-export common types
pub use analysis::{AnalysisResult, OutputSchema, ProfileId, PromptProfile, TranscriptRequest};
pub use config::{AppConfig, ValidationMode};
pub use error::*;
