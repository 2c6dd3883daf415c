//! Response validator for oracle output

use serde_json::Value;
use thiserror::Error;

use crate::domain::analysis::{ProfileId, PromptProfile, SchemaViolation};

/// Oracle output that cannot be trusted as a profile result
#[derive(Debug, Clone, Error)]
pub enum MalformedModelOutput {
    #[error("Model output is not valid JSON: {0}")]
    NotJson(String),

    #[error("Model output is not a JSON object")]
    NotAnObject,

    #[error("Model output does not match the {profile} schema: {}", join_violations(.violations))]
    SchemaMismatch {
        profile: ProfileId,
        violations: Vec<SchemaViolation>,
    },
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks oracle text against the schema of the profile that produced it
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parse `raw` and check it against `profile`'s schema.
    ///
    /// Text wrapped in prose or code fences is rejected as not JSON; fields
    /// the schema does not declare are accepted.
    pub fn validate(
        &self,
        raw: &str,
        profile: &PromptProfile,
    ) -> Result<Value, MalformedModelOutput> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| MalformedModelOutput::NotJson(e.to_string()))?;

        if !value.is_object() {
            return Err(MalformedModelOutput::NotAnObject);
        }

        let violations = profile.schema().validate(&value);
        if !violations.is_empty() {
            return Err(MalformedModelOutput::SchemaMismatch {
                profile: profile.id(),
                violations,
            });
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_OVERVIEW: &str = r#"{"threat_level":"MEDIUM","sentiment":"tired","tags":["resupply"],"key_insights":["low ammunition"]}"#;

    #[test]
    fn accepts_conforming_overview() {
        let value = ResponseValidator::new()
            .validate(VALID_OVERVIEW, &PromptProfile::overview())
            .unwrap();
        assert_eq!(value["threat_level"], "MEDIUM");
    }

    #[test]
    fn rejects_prose_wrapped_json() {
        let raw = format!("Here is the analysis:\n{}", VALID_OVERVIEW);
        let err = ResponseValidator::new()
            .validate(&raw, &PromptProfile::overview())
            .unwrap_err();
        assert!(matches!(err, MalformedModelOutput::NotJson(_)));
    }

    #[test]
    fn rejects_non_object() {
        let err = ResponseValidator::new()
            .validate(r#""MEDIUM""#, &PromptProfile::overview())
            .unwrap_err();
        assert!(matches!(err, MalformedModelOutput::NotAnObject));
    }

    #[test]
    fn overview_output_does_not_satisfy_detailed_profile() {
        let err = ResponseValidator::new()
            .validate(VALID_OVERVIEW, &PromptProfile::detailed())
            .unwrap_err();
        match err {
            MalformedModelOutput::SchemaMismatch {
                profile,
                violations,
            } => {
                assert_eq!(profile, ProfileId::Detailed);
                assert!(violations.iter().any(|v| v.path == "operational_insights"));
            }
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }

    #[test]
    fn mismatch_message_lists_paths() {
        let raw = r#"{"threat_level":"LOW","sentiment":"calm","tags":"none"}"#;
        let err = ResponseValidator::new()
            .validate(raw, &PromptProfile::overview())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Model output does not match the overview schema"));
        assert!(message.contains("tags: expected array of strings, found string"));
        assert!(message.contains("key_insights: missing required field"));
    }
}
