//! Analysis results and their typed views

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Oracle output as returned to the caller.
///
/// Nothing about the text is guaranteed unless it went through the
/// response validator; use [`AnalysisResult::decode`] to obtain a typed view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    raw: String,
}

impl AnalysisResult {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text exactly as the oracle produced it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn into_raw(self) -> String {
        self.raw
    }

    /// Decode the text into one of the report types
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Typed view of the `overview` profile output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub threat_level: ThreatLevel,
    pub sentiment: String,
    pub tags: Vec<String>,
    pub key_insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalInsights {
    pub troop_movements: Vec<String>,
    pub logistics: Vec<String>,
    pub command_structure: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationPatterns {
    pub frequency: String,
    pub urgency: String,
    pub code_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeospatialInfo {
    pub locations: Vec<String>,
    pub movement_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub immediate_risks: Vec<String>,
    pub potential_scenarios: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub countermeasures: Vec<String>,
    pub priority_actions: Vec<String>,
}

/// Typed view of the `detailed` profile output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub threat_level: ThreatLevel,
    pub threat_sources: Vec<String>,
    pub potential_actions: Vec<String>,
    pub sentiment: String,
    pub morale_indicators: Vec<String>,
    pub psychological_state: String,
    pub operational_insights: OperationalInsights,
    pub tactical_insights: Vec<String>,
    pub strategic_insights: Vec<String>,
    pub weaknesses: Vec<String>,
    pub communication_patterns: CommunicationPatterns,
    pub key_entities: Vec<String>,
    pub relationships: Map<String, Value>,
    pub geospatial_info: GeospatialInfo,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Recommendations,
}
