//! Analysis domain module

mod profile;
mod profile_id;
mod report;
mod schema;
mod transcript;

pub use profile::{detailed_schema, overview_schema, PromptProfile, ResponseMode, THREAT_LEVELS};
pub use profile_id::{ProfileId, ALL_PROFILES};
pub use report::{
    AnalysisResult, CommunicationPatterns, DetailedReport, GeospatialInfo, OperationalInsights,
    OverviewReport, Recommendations, RiskAssessment, ThreatLevel,
};
pub use schema::{FieldType, OutputSchema, SchemaField, SchemaViolation, ViolationKind};
pub use transcript::TranscriptRequest;
