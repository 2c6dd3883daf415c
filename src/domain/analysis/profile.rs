//! Prompt profile value object

use super::profile_id::ProfileId;
use super::schema::{FieldType, OutputSchema, SchemaField};

/// Allowed values of `threat_level` in every profile
pub const THREAT_LEVELS: &[&str] = &["LOW", "MEDIUM", "HIGH", "CRITICAL"];

/// Role shared by every profile
const ANALYST_ROLE: &str =
    "You are the world's top military strategist analyzing Russian radio communications.";

const OVERVIEW_TASK: &str =
    "Analyze the provided transcript and return a JSON object with the following structure:";

const DETAILED_TASK: &str = "Provide a detailed analysis of the transcript and return a JSON object with the following structure:";

const DETAILED_GUIDANCE: &str = r#"Analyze the transcript thoroughly and ensure all fields are populated with relevant information.
If certain information is not available in the transcript, provide reasoned assumptions based on
the available context. Focus on actionable intelligence and strategic insights."#;

/// Output format requested from the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// The oracle is instructed (not guaranteed) to emit a single JSON object
    #[default]
    JsonObject,
}

impl ResponseMode {
    /// Wire value of the response-format hint
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JsonObject => "json_object",
        }
    }
}

/// Immutable description of one kind of analysis: which model to call,
/// what to tell it, and what shape of answer to expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptProfile {
    id: ProfileId,
    model: String,
    system_instruction: String,
    response_mode: ResponseMode,
    schema: OutputSchema,
}

impl PromptProfile {
    /// Build the profile for `id`, calling `model`
    pub fn build(id: ProfileId, model: impl Into<String>) -> Self {
        let schema = match id {
            ProfileId::Overview => overview_schema(),
            ProfileId::Detailed => detailed_schema(),
        };

        let system_instruction = match id {
            ProfileId::Overview => {
                format!("{}\n{}\n{}", ANALYST_ROLE, OVERVIEW_TASK, schema.render())
            }
            ProfileId::Detailed => format!(
                "{}\n{}\n{}\n\n{}",
                ANALYST_ROLE,
                DETAILED_TASK,
                schema.render(),
                DETAILED_GUIDANCE
            ),
        };

        Self {
            id,
            model: model.into(),
            system_instruction,
            response_mode: ResponseMode::JsonObject,
            schema,
        }
    }

    /// Overview profile with its default model
    pub fn overview() -> Self {
        Self::build(ProfileId::Overview, ProfileId::Overview.default_model())
    }

    /// Detailed profile with its default model
    pub fn detailed() -> Self {
        Self::build(ProfileId::Detailed, ProfileId::Detailed.default_model())
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn response_mode(&self) -> ResponseMode {
        self.response_mode
    }

    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }
}

fn string_list(name: &'static str) -> SchemaField {
    SchemaField::required(name, FieldType::StringArray)
}

fn section(name: &'static str, fields: Vec<SchemaField>) -> SchemaField {
    SchemaField::required(name, FieldType::Object(fields))
}

/// Schema of the coarse assessment
pub fn overview_schema() -> OutputSchema {
    OutputSchema::new(vec![
        SchemaField::required("threat_level", FieldType::Enum(THREAT_LEVELS)),
        SchemaField::required("sentiment", FieldType::String)
            .with_hint("describing emotional tone and morale"),
        string_list("tags").with_hint("relevant military keywords"),
        string_list("key_insights").with_hint("important tactical/strategic observations"),
    ])
}

/// Schema of the exhaustive assessment
pub fn detailed_schema() -> OutputSchema {
    OutputSchema::new(vec![
        SchemaField::required("threat_level", FieldType::Enum(THREAT_LEVELS)),
        string_list("threat_sources"),
        string_list("potential_actions"),
        SchemaField::required("sentiment", FieldType::String),
        string_list("morale_indicators"),
        SchemaField::required("psychological_state", FieldType::String),
        section(
            "operational_insights",
            vec![
                string_list("troop_movements"),
                string_list("logistics"),
                string_list("command_structure"),
            ],
        ),
        string_list("tactical_insights"),
        string_list("strategic_insights"),
        string_list("weaknesses"),
        section(
            "communication_patterns",
            vec![
                SchemaField::required("frequency", FieldType::String),
                SchemaField::required("urgency", FieldType::String),
                string_list("code_words"),
            ],
        ),
        string_list("key_entities"),
        SchemaField::required("relationships", FieldType::Map)
            .with_hint("key-value pairs of relationships"),
        section(
            "geospatial_info",
            vec![string_list("locations"), string_list("movement_patterns")],
        ),
        section(
            "risk_assessment",
            vec![string_list("immediate_risks"), string_list("potential_scenarios")],
        ),
        section(
            "recommendations",
            vec![string_list("countermeasures"), string_list("priority_actions")],
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_instruction_embeds_schema() {
        let profile = PromptProfile::overview();
        let text = profile.system_instruction();
        assert!(text.starts_with(ANALYST_ROLE));
        assert!(text.contains("\"threat_level\": string (LOW, MEDIUM, HIGH, CRITICAL)"));
        assert!(text.contains("\"key_insights\": array of strings"));
        assert!(!text.contains("operational_insights"));
    }

    #[test]
    fn detailed_instruction_has_nested_sections_and_guidance() {
        let profile = PromptProfile::detailed();
        let text = profile.system_instruction();
        for section in [
            "operational_insights",
            "communication_patterns",
            "geospatial_info",
            "risk_assessment",
            "recommendations",
        ] {
            assert!(text.contains(section), "missing {}", section);
        }
        assert!(text.contains("\"relationships\": object (key-value pairs of relationships)"));
        assert!(text.ends_with("Focus on actionable intelligence and strategic insights."));
    }

    #[test]
    fn profiles_never_share_a_prompt() {
        assert_ne!(
            PromptProfile::overview().system_instruction(),
            PromptProfile::detailed().system_instruction()
        );
    }

    #[test]
    fn build_uses_given_model() {
        let profile = PromptProfile::build(ProfileId::Detailed, "gpt-4o-mini");
        assert_eq!(profile.model(), "gpt-4o-mini");
        assert_eq!(profile.id(), ProfileId::Detailed);
    }

    #[test]
    fn response_mode_is_json_object() {
        assert_eq!(PromptProfile::overview().response_mode().as_str(), "json_object");
    }

    #[test]
    fn detailed_schema_extends_overview_core() {
        let detailed = detailed_schema();
        for field in ["threat_level", "sentiment"] {
            assert!(detailed.field(field).is_some());
        }
        assert_eq!(overview_schema().fields().len(), 4);
        assert_eq!(detailed.fields().len(), 16);
    }
}
