//! Analyze transcript use case

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::analysis::AnalysisResult;
use crate::domain::config::{AppConfig, ValidationMode};
use crate::domain::error::ConfigurationError;

use super::pipeline::{ExtractionPipeline, PipelineError};
use super::ports::CompletionOracle;
use super::registry::ProfileRegistry;
use super::validator::{MalformedModelOutput, ResponseValidator};

/// Errors from the analyze use case
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Oracle(#[from] PipelineError),

    #[error(transparent)]
    Malformed(#[from] MalformedModelOutput),
}

/// Route-bound transcript analysis shared by every request handler.
///
/// Holds only immutable state; one instance serves all concurrent requests.
pub struct AnalysisService {
    registry: ProfileRegistry,
    pipeline: ExtractionPipeline,
    validator: ResponseValidator,
    mode: ValidationMode,
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService")
            .field("registry", &self.registry)
            .field("validator", &self.validator)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl AnalysisService {
    /// Create a new service instance
    pub fn new(
        registry: ProfileRegistry,
        oracle: Arc<dyn CompletionOracle>,
        mode: ValidationMode,
    ) -> Self {
        Self {
            registry,
            pipeline: ExtractionPipeline::new(oracle),
            validator: ResponseValidator::new(),
            mode,
        }
    }

    /// Create a service whose profiles and validation mode come from configuration
    pub fn from_config(config: &AppConfig, oracle: Arc<dyn CompletionOracle>) -> Self {
        Self::new(
            ProfileRegistry::from_config(config),
            oracle,
            config.validation_or_default(),
        )
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Analyze `transcript` with the profile bound to `route`.
    ///
    /// In passthrough mode the oracle text is returned as-is. In strict mode it
    /// is returned only if it parses and matches the profile schema.
    pub async fn analyze(
        &self,
        route: &str,
        transcript: &str,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let profile = self.registry.profile_for(route)?;
        let result = self.pipeline.run(transcript, profile).await?;

        if self.mode.is_strict() {
            if let Err(e) = self.validator.validate(result.raw(), profile) {
                warn!(profile = %profile.id(), error = %e, "Rejected oracle output");
                return Err(e.into());
            }
        }

        Ok(result)
    }
}
