use crate::error::Error;
use serde::Deserialize;
use serde_json::Value;
use std::{collections::BTreeMap, fmt};

/// The primitive JSON types a schema can require of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
    Null,
}

impl PrimitiveType {
    fn matches(self, value: &Value) -> bool {
        match self {
            PrimitiveType::Integer => value.is_i64() || value.is_u64(),
            PrimitiveType::Number => value.is_number(),
            PrimitiveType::String => value.is_string(),
            PrimitiveType::Boolean => value.is_boolean(),
            PrimitiveType::Array => value.is_array(),
            PrimitiveType::Object => value.is_object(),
            PrimitiveType::Null => value.is_null(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::String => "string",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Array => "array",
            PrimitiveType::Object => "object",
            PrimitiveType::Null => "null",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PropertySchema {
    #[serde(rename = "type")]
    kind: PrimitiveType,
}

/// A structural schema over a JSON object: which fields must be present and
/// which primitive type each declared field must carry.
///
/// Build one programmatically or deserialize it from the usual
/// JSON-Schema-like shape (`properties` / `required`; other keywords are
/// ignored).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schema {
    #[serde(default)]
    properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    required: Vec<String>,
}

/// One structural mismatch between an instance and a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    NotAnObject,
    MissingField(String),
    WrongType {
        field: String,
        expected: PrimitiveType,
        found: &'static str,
    },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::NotAnObject => write!(f, "the instance is not a JSON object"),
            SchemaViolation::MissingField(field) => {
                write!(f, "required field '{}' is missing", field)
            }
            SchemaViolation::WrongType {
                field,
                expected,
                found,
            } => write!(
                f,
                "field '{}' should be of type {} but is {}",
                field, expected, found
            ),
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the primitive type of `field`.
    pub fn property<S: Into<String>>(mut self, field: S, kind: PrimitiveType) -> Self {
        self.properties.insert(field.into(), PropertySchema { kind });
        self
    }

    /// Marks `field` as required.
    pub fn required<S: Into<String>>(mut self, field: S) -> Self {
        self.required.push(field.into());
        self
    }

    /// Parses a schema from a JSON-Schema-like mapping.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Checks `instance` against the schema, collecting every violation
    /// rather than stopping at the first one.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<SchemaViolation>> {
        let object = match instance.as_object() {
            Some(object) => object,
            None => return Err(vec![SchemaViolation::NotAnObject]),
        };

        let mut violations = Vec::new();

        for field in &self.required {
            if !object.contains_key(field) {
                violations.push(SchemaViolation::MissingField(field.clone()));
            }
        }

        for (field, property) in &self.properties {
            if let Some(value) = object.get(field) {
                if !property.kind.matches(value) {
                    violations.push(SchemaViolation::WrongType {
                        field: field.clone(),
                        expected: property.kind,
                        found: json_type_name(value),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
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
