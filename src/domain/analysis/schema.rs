//! Declarative output schema
//!
//! A schema lists the fields the oracle is asked to produce. The same
//! definition renders the JSON skeleton embedded in the system instruction
//! and checks the parsed output, so the request and the acceptance rule
//! cannot drift apart.

use std::fmt;

use serde_json::{Map, Value};

/// Indentation unit used when rendering the skeleton
const INDENT: &str = "    ";

/// Type of a single schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Free-form string
    String,
    /// String restricted to a fixed set of values
    Enum(&'static [&'static str]),
    /// Array whose elements are all strings
    StringArray,
    /// Free-form object of key/value pairs
    Map,
    /// Nested object with its own declared fields
    Object(Vec<SchemaField>),
}

impl FieldType {
    /// Name used in violation messages
    const fn expected(&self) -> &'static str {
        match self {
            Self::String | Self::Enum(_) => "string",
            Self::StringArray => "array of strings",
            Self::Map | Self::Object(_) => "object",
        }
    }
}

/// A named field inside a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub hint: Option<&'static str>,
}

impl SchemaField {
    /// Required field without a hint
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: true,
            hint: None,
        }
    }

    /// Field that may be omitted by the oracle
    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Attach a short description rendered next to the type
    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.hint = Some(hint);
        self
    }
}

/// What went wrong at a given path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    NotInEnum {
        value: String,
        allowed: &'static [&'static str],
    },
}

/// A single mismatch between a JSON value and the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: missing required field", self.path),
            ViolationKind::WrongType { expected, found } => {
                write!(f, "{}: expected {}, found {}", self.path, expected, found)
            }
            ViolationKind::NotInEnum { value, allowed } => write!(
                f,
                "{}: \"{}\" is not one of {}",
                self.path,
                value,
                allowed.join(", ")
            ),
        }
    }
}

/// Ordered set of top-level fields describing one JSON object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    fields: Vec<SchemaField>,
}

impl OutputSchema {
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Look up a top-level field by name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the JSON skeleton shown to the model
    pub fn render(&self) -> String {
        render_object(&self.fields, 0)
    }

    /// Check a parsed value against the schema.
    ///
    /// Returns every violation found; an empty list means the value conforms.
    /// Fields the schema does not declare are ignored.
    pub fn validate(&self, value: &Value) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();
        match value.as_object() {
            Some(object) => validate_object(&self.fields, object, "", &mut violations),
            None => violations.push(SchemaViolation {
                path: "$".to_string(),
                kind: ViolationKind::WrongType {
                    expected: "object",
                    found: json_type_name(value),
                },
            }),
        }
        violations
    }
}

fn render_object(fields: &[SchemaField], depth: usize) -> String {
    let inner = INDENT.repeat(depth + 1);
    let lines: Vec<String> = fields
        .iter()
        .map(|field| format!("{}\"{}\": {}", inner, field.name, render_type(field, depth + 1)))
        .collect();

    format!("{{\n{}\n{}}}", lines.join(",\n"), INDENT.repeat(depth))
}

fn render_type(field: &SchemaField, depth: usize) -> String {
    let base = match &field.field_type {
        FieldType::String => "string".to_string(),
        FieldType::Enum(values) => format!("string ({})", values.join(", ")),
        FieldType::StringArray => "array of strings".to_string(),
        FieldType::Map => "object".to_string(),
        FieldType::Object(fields) => return render_object(fields, depth),
    };

    match field.hint {
        Some(hint) => format!("{} ({})", base, hint),
        None => base,
    }
}

fn validate_object(
    fields: &[SchemaField],
    object: &Map<String, Value>,
    prefix: &str,
    violations: &mut Vec<SchemaViolation>,
) {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        match object.get(field.name) {
            None if field.required => violations.push(SchemaViolation {
                path,
                kind: ViolationKind::Missing,
            }),
            None => {}
            Some(value) => validate_value(&field.field_type, value, path, violations),
        }
    }
}

fn validate_value(
    field_type: &FieldType,
    value: &Value,
    path: String,
    violations: &mut Vec<SchemaViolation>,
) {
    let wrong_type = |path: String| SchemaViolation {
        path,
        kind: ViolationKind::WrongType {
            expected: field_type.expected(),
            found: json_type_name(value),
        },
    };

    match (field_type, value) {
        (FieldType::String, Value::String(_)) | (FieldType::Map, Value::Object(_)) => {}
        (FieldType::Enum(allowed), Value::String(s)) => {
            if !allowed.contains(&s.as_str()) {
                violations.push(SchemaViolation {
                    path,
                    kind: ViolationKind::NotInEnum {
                        value: s.clone(),
                        allowed: *allowed,
                    },
                });
            }
        }
        (FieldType::StringArray, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    violations.push(SchemaViolation {
                        path: format!("{}[{}]", path, i),
                        kind: ViolationKind::WrongType {
                            expected: "string",
                            found: json_type_name(item),
                        },
                    });
                }
            }
        }
        (FieldType::Object(fields), Value::Object(object)) => {
            validate_object(fields, object, &path, violations)
        }
        _ => violations.push(wrong_type(path)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
