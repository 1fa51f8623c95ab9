//! Argument binding.
//!
//! Turns the raw JSON arguments of a call into [`BoundArguments`] by walking
//! the descriptor's parameters in order, coercing supplied values and
//! substituting defaults for omitted optional parameters.

use serde_json::{Map, Value};

use super::error::{ToolError, ToolResult};
use super::schema::{ArgValue, BoundArguments, OperationDescriptor, ParamType, ParameterSpec};

/// Binds raw call arguments against an [`OperationDescriptor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArgumentBinder {
    /// Reject arguments that match no declared parameter.
    pub strict_extra_arguments: bool,
}

impl ArgumentBinder {
    pub fn new(strict_extra_arguments: bool) -> Self {
        Self {
            strict_extra_arguments,
        }
    }

    /// Bind `raw` against `descriptor`.
    pub fn bind(
        &self,
        descriptor: &OperationDescriptor,
        raw: &Map<String, Value>,
    ) -> ToolResult<BoundArguments> {
        if self.strict_extra_arguments {
            if let Some(unknown) = raw.keys().find(|k| descriptor.parameter(k).is_none()) {
                return Err(ToolError::invalid_arguments(format!(
                    "unexpected parameter '{}'",
                    unknown
                )));
            }
        }

        let mut bound = BoundArguments::default();
        for param in &descriptor.parameters {
            let value = match raw.get(&param.name) {
                Some(value) => coerce(param, value)?,
                None if param.required => {
                    return Err(ToolError::invalid_arguments(format!(
                        "missing required parameter '{}'",
                        param.name
                    )));
                }
                None => param.default.clone().ok_or_else(|| {
                    ToolError::internal(format!(
                        "optional parameter '{}' has no default",
                        param.name
                    ))
                })?,
            };
            bound.push(param.name.clone(), value);
        }

        Ok(bound)
    }
}

/// Coerce one raw value to the parameter's declared type.
fn coerce(param: &ParameterSpec, value: &Value) -> ToolResult<ArgValue> {
    let coerced = match param.param_type {
        ParamType::String => value.as_str().map(|s| ArgValue::String(s.to_string())),
        ParamType::Integer => coerce_integer(value).map(ArgValue::Integer),
        ParamType::Float => coerce_float(value).map(ArgValue::Float),
        ParamType::Boolean => coerce_boolean(value).map(ArgValue::Boolean),
    };

    coerced.ok_or_else(|| {
        ToolError::invalid_arguments(format!(
            "parameter '{}' expects {}, got {}",
            param.name,
            param.param_type,
            describe(value)
        ))
    })
}

/// 2^63, the first float past `i64::MAX`. `i64::MAX as f64` rounds up to it.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= -I64_BOUND && *f < I64_BOUND)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    let f = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    f.is_finite().then_some(f)
}

fn coerce_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string '{}'", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::error::FailureKind;
    use crate::domains::tools::schema::ReturnKind;
    use serde_json::json;

    fn greeting_descriptor() -> OperationDescriptor {
        OperationDescriptor {
            name: "create_custom_greeting".into(),
            description: String::new(),
            parameters: vec![
                ParameterSpec::required("name", ParamType::String),
                ParameterSpec::optional("greeting_type", ParamType::String, "friendly"),
                ParameterSpec::optional("include_time", ParamType::Boolean, false),
            ],
            return_kind: ReturnKind::Mapping,
        }
    }

    fn math_descriptor() -> OperationDescriptor {
        OperationDescriptor {
            name: "mixed".into(),
            description: String::new(),
            parameters: vec![
                ParameterSpec::required("a", ParamType::Integer),
                ParameterSpec::required("b", ParamType::Float),
            ],
            return_kind: ReturnKind::Scalar,
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_defaults_fill_omitted_optionals() {
        let bound = ArgumentBinder::default()
            .bind(&greeting_descriptor(), &args(json!({"name": "Bob"})))
            .unwrap();

        assert_eq!(bound.str("name").unwrap(), "Bob");
        assert_eq!(bound.str("greeting_type").unwrap(), "friendly");
        assert!(!bound.bool("include_time").unwrap());
    }

    #[test]
    fn test_bound_in_declaration_order() {
        let bound = ArgumentBinder::default()
            .bind(
                &greeting_descriptor(),
                &args(json!({"include_time": true, "name": "Bob"})),
            )
            .unwrap();
        let names: Vec<_> = bound.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "greeting_type", "include_time"]);
    }

    #[test]
    fn test_missing_required() {
        let err = ArgumentBinder::default()
            .bind(&greeting_descriptor(), &Map::new())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidArgument);
        assert!(err.to_string().contains("missing required parameter 'name'"));
    }

    #[test]
    fn test_type_mismatch_names_parameter() {
        let err = ArgumentBinder::default()
            .bind(&greeting_descriptor(), &args(json!({"name": 42})))
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidArgument);
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_boolean_literals_only() {
        let binder = ArgumentBinder::default();
        let d = greeting_descriptor();

        for accepted in [json!(true), json!("TRUE"), json!("True")] {
            let bound = binder
                .bind(&d, &args(json!({"name": "x", "include_time": accepted})))
                .unwrap();
            assert!(bound.bool("include_time").unwrap());
        }
        let bound = binder
            .bind(&d, &args(json!({"name": "x", "include_time": "false"})))
            .unwrap();
        assert!(!bound.bool("include_time").unwrap());

        for rejected in [json!(1), json!(0), json!("yes"), json!(""), json!(null)] {
            let result = binder.bind(&d, &args(json!({"name": "x", "include_time": rejected})));
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_numeric_coercion() {
        let binder = ArgumentBinder::default();
        let d = math_descriptor();

        let bound = binder.bind(&d, &args(json!({"a": 10, "b": 4}))).unwrap();
        assert_eq!(bound.i64("a").unwrap(), 10);
        assert_eq!(bound.f64("b").unwrap(), 4.0);

        let bound = binder.bind(&d, &args(json!({"a": 10.0, "b": "2.5"}))).unwrap();
        assert_eq!(bound.i64("a").unwrap(), 10);
        assert_eq!(bound.f64("b").unwrap(), 2.5);

        let bound = binder.bind(&d, &args(json!({"a": "-7", "b": 1}))).unwrap();
        assert_eq!(bound.i64("a").unwrap(), -7);

        assert!(binder.bind(&d, &args(json!({"a": 1.5, "b": 1}))).is_err());
        assert!(binder.bind(&d, &args(json!({"a": true, "b": 1}))).is_err());
        assert!(binder.bind(&d, &args(json!({"a": 1, "b": "abc"}))).is_err());
        assert!(binder.bind(&d, &args(json!({"a": 1, "b": "NaN"}))).is_err());
    }

    #[test]
    fn test_integer_range_is_exact() {
        let binder = ArgumentBinder::default();
        let d = math_descriptor();

        let bound = binder
            .bind(&d, &args(json!({"a": i64::MAX, "b": 0})))
            .unwrap();
        assert_eq!(bound.i64("a").unwrap(), i64::MAX);

        let bound = binder
            .bind(&d, &args(json!({"a": i64::MIN, "b": 0})))
            .unwrap();
        assert_eq!(bound.i64("a").unwrap(), i64::MIN);

        let too_big: Value = serde_json::from_str("9223372036854775808").unwrap();
        let err = binder
            .bind(&d, &args(json!({"a": too_big, "b": 0})))
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidArgument);
        assert!(err.to_string().contains("'a'"));

        for out_of_range in [json!(9.3e18), json!(-9.3e18), json!(1e300)] {
            assert!(binder.bind(&d, &args(json!({"a": out_of_range, "b": 0}))).is_err());
        }
    }

    #[test]
    fn test_extra_arguments_permissive_by_default() {
        let bound = ArgumentBinder::default()
            .bind(&greeting_descriptor(), &args(json!({"name": "x", "mood": "happy"})))
            .unwrap();
        assert!(bound.get("mood").is_none());
    }

    #[test]
    fn test_extra_arguments_rejected_in_strict_mode() {
        let err = ArgumentBinder::new(true)
            .bind(&greeting_descriptor(), &args(json!({"name": "x", "mood": "happy"})))
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::InvalidArgument);
        assert!(err.to_string().contains("'mood'"));
    }

    #[test]
    fn test_bind_is_idempotent() {
        let binder = ArgumentBinder::default();
        let d = greeting_descriptor();
        let raw = args(json!({"name": "Carol", "include_time": "true"}));
        assert_eq!(binder.bind(&d, &raw).unwrap(), binder.bind(&d, &raw).unwrap());
    }
}
