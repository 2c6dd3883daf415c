//! Application layer - Use cases and port interfaces
//!
//! Contains the extraction pipeline, the response validator, the profile
//! registry and the trait definitions for external system interactions.

pub mod analyze;
pub mod pipeline;
pub mod ports;
pub mod registry;
pub mod validator;

// Re-export use cases
pub use analyze::{AnalysisService, AnalyzeError};
pub use pipeline::{ExtractionPipeline, PipelineError};
pub use registry::ProfileRegistry;
pub use validator::{MalformedModelOutput, ResponseValidator};
