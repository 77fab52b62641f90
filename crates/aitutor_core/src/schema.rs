//! Declared response shapes and their structural validation.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Type of a single named field in a structured response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum FieldKind {
    /// Any string
    String,
    /// A string restricted to the listed values
    OneOf(Vec<String>),
    /// A list of strings
    StringList,
}

/// A named, required field of a structured response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
}

impl FieldSpec {
    /// Creates a field specification.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for a plain string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Shorthand for a string field restricted to `values`.
    pub fn one_of<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            FieldKind::OneOf(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Shorthand for a list-of-strings field.
    pub fn string_list(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::StringList)
    }

    fn check(&self, object: &serde_json::Map<String, Value>) -> Result<(), SchemaViolation> {
        let value = object
            .get(&self.name)
            .ok_or_else(|| SchemaViolation::MissingField(self.name.clone()))?;

        let conforms = match (&self.kind, value) {
            (FieldKind::String, Value::String(_)) => true,
            (FieldKind::OneOf(allowed), Value::String(s)) => allowed.iter().any(|a| a == s),
            (FieldKind::StringList, Value::Array(items)) => items.iter().all(Value::is_string),
            _ => false,
        };

        if conforms {
            Ok(())
        } else {
            Err(SchemaViolation::WrongFieldType(self.name.clone()))
        }
    }
}

/// Why a response failed to match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SchemaViolation {
    /// The text was not valid JSON
    #[display("Response is not valid JSON: {}", _0)]
    InvalidJson(String),
    /// Expected a JSON object
    #[display("Expected a JSON object")]
    NotAnObject,
    /// Expected a JSON array
    #[display("Expected a JSON array")]
    NotAnArray,
    /// A required field is absent
    #[display("Missing field '{}'", _0)]
    MissingField(String),
    /// A field has the wrong type or a disallowed value
    #[display("Field '{}' has the wrong type or value", _0)]
    WrongFieldType(String),
    /// The shape carries no textual payload
    #[display("Schema has no textual payload")]
    NoTextPayload,
}

impl std::error::Error for SchemaViolation {}

/// Expected structure of a template's response.
///
/// # Examples
///
/// ```
/// use aitutor_core::{FieldSpec, ResponseSchema};
/// use serde_json::json;
///
/// let schema = ResponseSchema::Object(vec![FieldSpec::string("response")]);
/// let parsed = schema.parse(r#"{"response": "Hi!"}"#).unwrap();
/// assert_eq!(parsed, json!({"response": "Hi!"}));
///
/// assert!(schema.parse("not json").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", content = "fields", rename_all = "snake_case")]
pub enum ResponseSchema {
    /// Free text, wrapped as `{"response": text}`
    Text,
    /// A JSON object with the given required fields
    Object(Vec<FieldSpec>),
    /// A JSON array of objects with the given required fields
    Array(Vec<FieldSpec>),
    /// No textual payload; the result travels in the image channel
    Image,
}

impl ResponseSchema {
    /// The `{"response": string}` shape shared by most templates.
    pub fn text_object() -> Self {
        Self::Object(vec![FieldSpec::string("response")])
    }

    /// Whether the provider should be asked for JSON output.
    pub fn expects_json(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Checks an already-parsed value against this shape.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaViolation> {
        match self {
            Self::Text => match value {
                Value::Object(map) => FieldSpec::string("response").check(map),
                _ => Err(SchemaViolation::NotAnObject),
            },
            Self::Object(fields) => validate_object(fields, value),
            Self::Array(fields) => match value {
                Value::Array(items) => items
                    .iter()
                    .try_for_each(|item| validate_object(fields, item)),
                _ => Err(SchemaViolation::NotAnArray),
            },
            Self::Image => Err(SchemaViolation::NoTextPayload),
        }
    }

    /// Parses provider text into a value conforming to this shape.
    pub fn parse(&self, text: &str) -> Result<Value, SchemaViolation> {
        match self {
            Self::Text => Ok(json!({ "response": text })),
            Self::Object(_) | Self::Array(_) => {
                let value: Value = serde_json::from_str(text)
                    .map_err(|e| SchemaViolation::InvalidJson(e.to_string()))?;
                self.validate(&value)?;
                Ok(value)
            }
            Self::Image => Err(SchemaViolation::NoTextPayload),
        }
    }
}

fn validate_object(fields: &[FieldSpec], value: &Value) -> Result<(), SchemaViolation> {
    let map = value.as_object().ok_or(SchemaViolation::NotAnObject)?;
    fields.iter().try_for_each(|field| field.check(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_schema() -> ResponseSchema {
        ResponseSchema::Array(vec![
            FieldSpec::string("question"),
            FieldSpec::string("answer"),
            FieldSpec::string_list("options"),
        ])
    }

    #[test]
    fn test_text_schema_wraps_raw_text() {
        let parsed = ResponseSchema::Text.parse("not json at all").unwrap();
        assert_eq!(parsed, json!({"response": "not json at all"}));
    }

    #[test]
    fn test_object_schema_tolerates_extra_fields() {
        let parsed = ResponseSchema::text_object()
            .parse(r#"{"response": "ok", "confidence": "high"}"#)
            .unwrap();
        assert_eq!(parsed["response"], "ok");
    }

    #[test]
    fn test_object_schema_rejects_missing_and_mistyped_fields() {
        let schema = ResponseSchema::text_object();
        assert_eq!(
            schema.parse(r#"{"answer": "ok"}"#),
            Err(SchemaViolation::MissingField("response".to_string()))
        );
        assert_eq!(
            schema.parse(r#"{"response": 42}"#),
            Err(SchemaViolation::WrongFieldType("response".to_string()))
        );
        assert_eq!(schema.parse(r#"["ok"]"#), Err(SchemaViolation::NotAnObject));
    }

    #[test]
    fn test_one_of_rejects_values_outside_the_set() {
        let schema = ResponseSchema::Object(vec![
            FieldSpec::string("name"),
            FieldSpec::one_of("topic", ["math", "science"]),
        ]);
        assert!(schema.parse(r#"{"name": "Fractions", "topic": "math"}"#).is_ok());
        assert_eq!(
            schema.parse(r#"{"name": "Fractions", "topic": "cooking"}"#),
            Err(SchemaViolation::WrongFieldType("topic".to_string()))
        );
    }

    #[test]
    fn test_array_schema_checks_every_element() {
        let schema = quiz_schema();
        let good = r#"[{"question": "2+2?", "answer": "4", "options": ["3", "4", "5", "6"]}]"#;
        assert!(schema.parse(good).is_ok());

        let bad = r#"[
            {"question": "2+2?", "answer": "4", "options": ["3", "4"]},
            {"question": "3+3?", "answer": "6", "options": [6]}
        ]"#;
        assert_eq!(
            schema.parse(bad),
            Err(SchemaViolation::WrongFieldType("options".to_string()))
        );
        assert_eq!(
            schema.parse(r#"{"question": "x"}"#),
            Err(SchemaViolation::NotAnArray)
        );
    }

    #[test]
    fn test_malformed_json_is_a_violation() {
        let err = ResponseSchema::text_object().parse("not json").unwrap_err();
        assert!(matches!(err, SchemaViolation::InvalidJson(_)));
    }

    #[test]
    fn test_image_schema_has_no_text_payload() {
        assert_eq!(
            ResponseSchema::Image.parse("anything"),
            Err(SchemaViolation::NoTextPayload)
        );
        assert!(!ResponseSchema::Image.expects_json());
    }
}
