//! Parameter schema declaration and binding.
//!
//! A profile declares its user-tunable parameters up front; the portal (or,
//! here, the CLI) supplies a flat key/value map that is bound against that
//! schema. Binding applies defaults for absent keys and coerces supplied
//! strings to each parameter's declared kind. The schema is the sole
//! validation gate in the pipeline; the topology builder trusts whatever
//! binding produced.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterKind {
    /// A disk image URN
    Image,
    /// A testbed hardware type; the empty string means "any available"
    NodeType,
    /// Free-form text
    String,
    /// A whole number
    Integer,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterKind::Image => "image",
            ParameterKind::NodeType => "nodetype",
            ParameterKind::String => "string",
            ParameterKind::Integer => "integer",
        };
        write!(f, "{}", name)
    }
}

/// A concrete parameter value, after coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParameterValue {
    Text(String),
    Integer(i64),
}

impl ParameterValue {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        ParameterValue::Text(value.into())
    }

    fn matches(&self, kind: ParameterKind) -> bool {
        match kind {
            ParameterKind::Integer => matches!(self, ParameterValue::Integer(_)),
            _ => matches!(self, ParameterValue::Text(_)),
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(text) => write!(f, "{}", text),
            ParameterValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    /// Unique identifier within the schema
    pub key: String,
    /// Display label shown on the instantiation page
    pub label: String,
    /// Declared kind, used for coercion of supplied values
    pub kind: ParameterKind,
    /// Value used when nothing is supplied for this key
    pub default: ParameterValue,
    /// Longer human-readable description
    pub description: String,
}

/// An ordered set of parameter declarations.
///
/// Declaration order is preserved for display purposes only; it carries no
/// semantic weight in the topology.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    parameters: Vec<Parameter>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one parameter. Keys must be unique within a schema and the
    /// default must match the declared kind; both are programming errors in
    /// the preset definitions, not user input, so they panic.
    pub fn define(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        kind: ParameterKind,
        default: ParameterValue,
        description: impl Into<String>,
    ) -> &mut Self {
        let key = key.into();
        assert!(
            !self.parameters.iter().any(|p| p.key == key),
            "duplicate parameter key '{}'",
            key
        );
        assert!(
            default.matches(kind),
            "default for '{}' does not match kind {}",
            key,
            kind
        );
        self.parameters.push(Parameter {
            key,
            label: label.into(),
            kind,
            default,
            description: description.into(),
        });
        self
    }

    /// The declared parameters, in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Bind supplied values against this schema.
    ///
    /// Absent keys fall back to their declared defaults. Supplied values are
    /// coerced to the declared kind; a value that cannot be coerced, or a
    /// key that was never declared, aborts the whole binding.
    pub fn bind(
        &self,
        supplied: &HashMap<String, String>,
    ) -> Result<BoundParameters, ValidationError> {
        for key in supplied.keys() {
            if !self.parameters.iter().any(|p| &p.key == key) {
                return Err(ValidationError::UnknownParameter(key.clone()));
            }
        }

        let mut values = HashMap::new();
        for parameter in &self.parameters {
            let value = match supplied.get(&parameter.key) {
                Some(raw) => coerce(parameter, raw)?,
                None => parameter.default.clone(),
            };
            values.insert(parameter.key.clone(), value);
        }
        Ok(BoundParameters { values })
    }
}

fn coerce(parameter: &Parameter, raw: &str) -> Result<ParameterValue, ValidationError> {
    match parameter.kind {
        ParameterKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(ParameterValue::Integer)
            .map_err(|_| ValidationError::NotAnInteger {
                key: parameter.key.clone(),
                value: raw.to_string(),
            }),
        ParameterKind::Image | ParameterKind::NodeType | ParameterKind::String => {
            Ok(ParameterValue::Text(raw.to_string()))
        }
    }
}

/// The result of binding: an immutable key -> value map.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParameters {
    values: HashMap<String, ParameterValue>,
}

impl BoundParameters {
    /// The text value bound for `key`, if the key is bound and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ParameterValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The integer value bound for `key`, if the key is bound and numeric.
    pub fn integer(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(ParameterValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }
}

/// Parameter binding errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
    #[error("parameter '{key}' expects an integer, got '{value}'")]
    NotAnInteger { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        let mut schema = Schema::new();
        schema
            .define(
                "osImage",
                "Operating System Image",
                ParameterKind::Image,
                ParameterValue::text("urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU24-64-STD"),
                "OS image for all nodes.",
            )
            .define(
                "hwType",
                "Hardware Type",
                ParameterKind::NodeType,
                ParameterValue::text("d8545"),
                "Hardware type for all nodes.",
            )
            .define(
                "coreCount",
                "Core Count",
                ParameterKind::Integer,
                ParameterValue::Integer(8),
                "Cores per node.",
            );
        schema
    }

    #[test]
    fn test_defaults_applied_when_nothing_supplied() {
        let params = sample_schema().bind(&HashMap::new()).unwrap();
        assert_eq!(
            params.text("osImage"),
            Some("urn:publicid:IDN+emulab.net+image+emulab-ops:UBUNTU24-64-STD")
        );
        assert_eq!(params.text("hwType"), Some("d8545"));
        assert_eq!(params.integer("coreCount"), Some(8));
    }

    #[test]
    fn test_supplied_values_override_defaults() {
        let mut supplied = HashMap::new();
        supplied.insert("hwType".to_string(), "nvidiagh".to_string());
        supplied.insert("coreCount".to_string(), "16".to_string());

        let params = sample_schema().bind(&supplied).unwrap();
        assert_eq!(params.text("hwType"), Some("nvidiagh"));
        assert_eq!(params.integer("coreCount"), Some(16));
    }

    #[test]
    fn test_integer_coercion_failure() {
        let mut supplied = HashMap::new();
        supplied.insert("coreCount".to_string(), "eight".to_string());

        let err = sample_schema().bind(&supplied).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnInteger { .. }));
        assert!(err.to_string().contains("coreCount"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut supplied = HashMap::new();
        supplied.insert("osimage".to_string(), "typo".to_string());

        let err = sample_schema().bind(&supplied).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownParameter(_)));
    }

    #[test]
    fn test_empty_nodetype_is_a_valid_binding() {
        // Empty means "any available hardware"; coercion must not reject it.
        let mut supplied = HashMap::new();
        supplied.insert("hwType".to_string(), String::new());

        let params = sample_schema().bind(&supplied).unwrap();
        assert_eq!(params.text("hwType"), Some(""));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let schema = sample_schema();
        let keys: Vec<&str> = schema.parameters().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["osImage", "hwType", "coreCount"]);
    }

    #[test]
    #[should_panic(expected = "duplicate parameter key")]
    fn test_duplicate_key_panics() {
        let mut schema = Schema::new();
        schema.define(
            "osImage",
            "Image",
            ParameterKind::Image,
            ParameterValue::text("urn:a"),
            "",
        );
        schema.define(
            "osImage",
            "Image again",
            ParameterKind::Image,
            ParameterValue::text("urn:b"),
            "",
        );
    }

    #[test]
    fn test_integer_accepts_surrounding_whitespace() {
        let mut supplied = HashMap::new();
        supplied.insert("coreCount".to_string(), " 12 ".to_string());

        let params = sample_schema().bind(&supplied).unwrap();
        assert_eq!(params.integer("coreCount"), Some(12));
    }
}
