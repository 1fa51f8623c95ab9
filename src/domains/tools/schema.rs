//! Operation descriptors and typed argument values.
//!
//! An [`OperationDescriptor`] is the static contract of a tool: its name,
//! its ordered parameter list and the shape of what it returns. Descriptors
//! are built once when a catalog is registered and never change afterwards.

use std::fmt;

use serde_json::{Map, Value};

use super::error::{ToolError, ToolResult};

// ============================================================================
// Parameter types and values
// ============================================================================

/// The declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Float,
    Boolean,
}

impl ParamType {
    /// JSON Schema type name.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A bound, already-coerced argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl ArgValue {
    /// The parameter type this value satisfies.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::String(_) => ParamType::String,
            Self::Integer(_) => ParamType::Integer,
            Self::Float(_) => ParamType::Float,
            Self::Boolean(_) => ParamType::Boolean,
        }
    }

    /// Convert back to JSON (used for schema defaults and introspection).
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => Value::from(*f),
            Self::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "'{}'", s),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

// ============================================================================
// Parameter descriptors
// ============================================================================

/// Declaration of a single tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
    pub default: Option<ArgValue>,
    pub description: Option<String>,
}

impl ParameterSpec {
    /// A parameter the caller must supply.
    pub fn required(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: true,
            default: None,
            description: None,
        }
    }

    /// A parameter that falls back to `default` when omitted.
    pub fn optional(
        name: impl Into<String>,
        param_type: ParamType,
        default: impl Into<ArgValue>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            default: Some(default.into()),
            description: None,
        }
    }

    /// Attach a human readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Short signature used by the REST introspection endpoint,
    /// e.g. `string (optional, default='World')`.
    pub fn signature(&self) -> String {
        match (&self.default, self.required) {
            (_, true) => format!("{} (required)", self.param_type),
            (Some(default), false) => {
                format!("{} (optional, default={})", self.param_type, default)
            }
            (None, false) => format!("{} (optional)", self.param_type),
        }
    }
}

// ============================================================================
// Operation descriptor
// ============================================================================

/// The shape of a tool's successful result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnKind {
    Scalar,
    Mapping,
    Sequence,
}

impl ReturnKind {
    /// Whether `value` has this shape. `null` counts as a scalar.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Scalar => !value.is_object() && !value.is_array(),
            Self::Mapping => value.is_object(),
            Self::Sequence => value.is_array(),
        }
    }
}

/// Static description of a registered tool.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    pub return_kind: ReturnKind,
}

impl OperationDescriptor {
    /// Look up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// JSON Schema object describing the tool's input.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            let mut property = Map::new();
            property.insert("type".into(), Value::from(param.param_type.json_type()));
            if let Some(description) = &param.description {
                property.insert("description".into(), Value::from(description.as_str()));
            }
            if let Some(default) = &param.default {
                property.insert("default".into(), default.to_json());
            }
            if param.required {
                required.push(Value::from(param.name.as_str()));
            }
            properties.insert(param.name.clone(), Value::Object(property));
        }

        let mut schema = Map::new();
        schema.insert("type".into(), Value::from("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".into(), Value::Array(required));
        }
        schema
    }
}

// ============================================================================
// Bound arguments
// ============================================================================

/// Arguments after binding: every declared parameter present, in
/// declaration order, with its coerced value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: Vec<(String, ArgValue)>,
}

impl BoundArguments {
    pub(crate) fn push(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn str(&self, name: &str) -> ToolResult<&str> {
        match self.get(name) {
            Some(ArgValue::String(s)) => Ok(s),
            other => Err(Self::mismatch(name, ParamType::String, other)),
        }
    }

    pub fn i64(&self, name: &str) -> ToolResult<i64> {
        match self.get(name) {
            Some(ArgValue::Integer(i)) => Ok(*i),
            other => Err(Self::mismatch(name, ParamType::Integer, other)),
        }
    }

    pub fn f64(&self, name: &str) -> ToolResult<f64> {
        match self.get(name) {
            Some(ArgValue::Float(f)) => Ok(*f),
            other => Err(Self::mismatch(name, ParamType::Float, other)),
        }
    }

    pub fn bool(&self, name: &str) -> ToolResult<bool> {
        match self.get(name) {
            Some(ArgValue::Boolean(b)) => Ok(*b),
            other => Err(Self::mismatch(name, ParamType::Boolean, other)),
        }
    }

    // Only reachable when a body asks for a parameter its descriptor does
    // not declare with that type.
    fn mismatch(name: &str, expected: ParamType, found: Option<&ArgValue>) -> ToolError {
        match found {
            Some(value) => ToolError::internal(format!(
                "parameter '{}' is bound as {}, not {}",
                name,
                value.param_type(),
                expected
            )),
            None => ToolError::internal(format!("parameter '{}' is not bound", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> OperationDescriptor {
        OperationDescriptor {
            name: "create_custom_greeting".into(),
            description: "Creates a custom greeting".into(),
            parameters: vec![
                ParameterSpec::required("name", ParamType::String).describe("Who to greet"),
                ParameterSpec::optional("greeting_type", ParamType::String, "friendly"),
                ParameterSpec::optional("include_time", ParamType::Boolean, false),
            ],
            return_kind: ReturnKind::Mapping,
        }
    }

    #[test]
    fn test_signature() {
        let d = descriptor();
        assert_eq!(d.parameters[0].signature(), "string (required)");
        assert_eq!(
            d.parameters[1].signature(),
            "string (optional, default='friendly')"
        );
        assert_eq!(
            d.parameters[2].signature(),
            "boolean (optional, default=false)"
        );
    }

    #[test]
    fn test_input_schema() {
        let schema = Value::Object(descriptor().input_schema());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["name"]["type"], "string");
        assert_eq!(schema["properties"]["name"]["description"], "Who to greet");
        assert_eq!(schema["properties"]["include_time"]["default"], false);
        assert_eq!(schema["required"], serde_json::json!(["name"]));
    }

    #[test]
    fn test_input_schema_without_required() {
        let d = OperationDescriptor {
            name: "say_hello".into(),
            description: String::new(),
            parameters: vec![ParameterSpec::optional("name", ParamType::String, "World")],
            return_kind: ReturnKind::Scalar,
        };
        let schema = d.input_schema();
        assert!(!schema.contains_key("required"));
    }

    #[test]
    fn test_return_kind_matches() {
        assert!(ReturnKind::Scalar.matches(&Value::from("hi")));
        assert!(ReturnKind::Scalar.matches(&Value::Null));
        assert!(!ReturnKind::Scalar.matches(&serde_json::json!([])));
        assert!(ReturnKind::Mapping.matches(&serde_json::json!({})));
        assert!(ReturnKind::Sequence.matches(&serde_json::json!([1, 2])));
    }

    #[test]
    fn test_bound_accessors() {
        let mut args = BoundArguments::default();
        args.push("name", ArgValue::from("Alice"));
        args.push("n", ArgValue::from(3i64));

        assert_eq!(args.str("name").unwrap(), "Alice");
        assert_eq!(args.i64("n").unwrap(), 3);
        assert!(args.bool("name").is_err());
        assert!(args.f64("missing").is_err());
        assert_eq!(args.len(), 2);
    }
}
