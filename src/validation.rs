//! Schema validation helpers.
//!
//! Checks a `serde_json::Value` configuration against a [`Schema`] and
//! reports problems as diagnostics.
//!
//! # Example
//!
//! ```
//! use readarr_provider::schema::{Attribute, Schema};
//! use readarr_provider::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0()
//!     .with_attribute("name", Attribute::required_string())
//!     .with_attribute("priority", Attribute::optional_int64().one_of_int(&[0, 1]));
//!
//! assert!(validate(&schema, &json!({"name": "qbit", "priority": 1})).is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"name": "qbit", "priority": 7}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].attribute, Some("priority".to_string()));
//! ```

use std::collections::BTreeMap;

use serde_json::Value;

use crate::schema::{Attribute, AttributeType, Diagnostic, Schema, Validator};

/// Validate a JSON value against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Computed-only attributes are skipped (the provider sets these)
/// - Attribute types must match the schema
/// - `one_of` validators must be satisfied
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match value {
        Value::Object(map) => map,
        Value::Null => return diagnostics,
        _ => {
            diagnostics.push(
                Diagnostic::error("Expected object")
                    .with_detail(format!("Got {}", value_type_name(value))),
            );
            return diagnostics;
        }
    };

    for (name, attr) in &schema.block.attributes {
        validate_attribute(attr, obj.get(name), name, &mut diagnostics);
    }
    diagnostics
}

fn validate_attribute(
    attr: &Attribute,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if attr.flags.is_computed_only() {
        return;
    }

    match value {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        }
        Some(v) => {
            let before = diagnostics.len();
            validate_attribute_type(&attr.attr_type, v, path, diagnostics);
            if diagnostics.len() == before {
                for validator in &attr.validators {
                    if let Some(diag) = check_validator(validator, v, path) {
                        diagnostics.push(diag);
                    }
                }
            }
        }
    }
}

fn check_validator(validator: &Validator, value: &Value, path: &str) -> Option<Diagnostic> {
    let (ok, allowed) = match validator {
        Validator::OneOfInt(allowed) => (
            value.as_i64().is_some_and(|v| allowed.contains(&v)),
            format!("{:?}", allowed),
        ),
        Validator::OneOfString(allowed) => (
            value
                .as_str()
                .is_some_and(|v| allowed.iter().any(|a| a == v)),
            format!("{:?}", allowed),
        ),
    };

    if ok {
        return None;
    }
    Some(
        Diagnostic::error("Invalid Attribute Value Match")
            .with_detail(format!(
                "Attribute {} value must be one of: {}, got: {}",
                path, allowed, value
            ))
            .with_attribute(path),
    )
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if !value.is_string() {
                diagnostics.push(type_error(path, "string", value));
            }
        }
        AttributeType::Int64 => {
            if !is_int64(value) {
                diagnostics.push(type_error(path, "int64", value));
            }
        }
        AttributeType::Float64 => {
            if !value.is_number() {
                diagnostics.push(type_error(path, "float64", value));
            }
        }
        AttributeType::Bool => {
            if !value.is_boolean() {
                diagnostics.push(type_error(path, "bool", value));
            }
        }
        AttributeType::Set(element_type) => {
            // sets travel as JSON arrays
            if let Some(arr) = value.as_array() {
                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}.{}", path, i);
                    validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                }
            } else {
                diagnostics.push(type_error(path, "set", value));
            }
        }
        AttributeType::Object(attrs) => {
            if let Some(obj) = value.as_object() {
                validate_object_type(attrs, obj, path, diagnostics);
            } else {
                diagnostics.push(type_error(path, "object", value));
            }
        }
    }
}

fn validate_object_type(
    attrs: &BTreeMap<String, AttributeType>,
    obj: &serde_json::Map<String, Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for (name, attr_type) in attrs {
        let attr_path = format!("{}.{}", path, name);
        match obj.get(name) {
            None | Some(Value::Null) => {}
            Some(value) => validate_attribute_type(attr_type, value, &attr_path, diagnostics),
        }
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64()
                || n.as_f64().is_some_and(|f| {
                    f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64
                })
        }
        _ => false,
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic::error(format!("Invalid type for attribute '{}'", path))
        .with_detail(format!(
            "Expected {}, got {}",
            expected,
            value_type_name(got)
        ))
        .with_attribute(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, Schema};
    use serde_json::json;

    #[test]
    fn test_validate_required_string() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        assert!(validate(&schema, &json!({"name": "test"})).is_empty());

        let diagnostics = validate(&schema, &json!({}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("name".to_string()));

        let diagnostics = validate(&schema, &json!({"name": null}));
        assert_eq!(diagnostics.len(), 1);

        let diagnostics = validate(&schema, &json!({"name": 123}));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Invalid type"));
    }

    #[test]
    fn test_validate_optional_attribute() {
        let schema = Schema::v0().with_attribute("port", Attribute::optional_int64());

        assert!(validate(&schema, &json!({"port": 8080})).is_empty());
        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate(&schema, &json!({"port": null})).is_empty());
        assert_eq!(validate(&schema, &json!({"port": "8080"})).len(), 1);
    }

    #[test]
    fn test_validate_computed_attribute_skipped() {
        let schema = Schema::v0().with_attribute("id", Attribute::id());

        assert!(validate(&schema, &json!({})).is_empty());
        assert!(validate(&schema, &json!({"id": "not a number"})).is_empty());
    }

    #[test]
    fn test_validate_int64() {
        let schema = Schema::v0().with_attribute("priority", Attribute::required_int64());

        assert!(validate(&schema, &json!({"priority": 42})).is_empty());
        assert!(validate(&schema, &json!({"priority": 42.0})).is_empty());
        assert_eq!(validate(&schema, &json!({"priority": 42.5})).len(), 1);
        assert_eq!(validate(&schema, &json!({"priority": "42"})).len(), 1);
    }

    #[test]
    fn test_validate_float64() {
        let schema = Schema::v0().with_attribute("seed_ratio", Attribute::optional_float64());

        assert!(validate(&schema, &json!({"seed_ratio": 0.5})).is_empty());
        assert!(validate(&schema, &json!({"seed_ratio": 1})).is_empty());
        assert_eq!(validate(&schema, &json!({"seed_ratio": "1.0"})).len(), 1);
    }

    #[test]
    fn test_validate_set() {
        let schema = Schema::v0().with_attribute("tags", Attribute::required_int_set());

        assert!(validate(&schema, &json!({"tags": [1, 2, 3]})).is_empty());
        assert!(validate(&schema, &json!({"tags": []})).is_empty());

        let diagnostics = validate(&schema, &json!({"tags": [1, "two", 3]}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("tags.1".to_string()));

        assert_eq!(validate(&schema, &json!({"tags": 1})).len(), 1);
    }

    #[test]
    fn test_validate_one_of_int() {
        let schema = Schema::v0().with_attribute(
            "initial_state",
            Attribute::optional_int64().one_of_int(&[0, 1, 2]),
        );

        assert!(validate(&schema, &json!({"initial_state": 2})).is_empty());

        let diagnostics = validate(&schema, &json!({"initial_state": 3}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].summary, "Invalid Attribute Value Match");
        assert!(diagnostics[0]
            .detail
            .as_deref()
            .unwrap()
            .contains("[0, 1, 2]"));
    }

    #[test]
    fn test_validate_one_of_string() {
        let schema = Schema::v0().with_attribute(
            "preferred_protocol",
            Attribute::optional_string().one_of_string(&["usenet", "torrent"]),
        );

        assert!(validate(&schema, &json!({"preferred_protocol": "torrent"})).is_empty());
        assert_eq!(
            validate(&schema, &json!({"preferred_protocol": "ftp"})).len(),
            1
        );
    }

    #[test]
    fn test_validator_skipped_on_type_error() {
        let schema = Schema::v0().with_attribute(
            "method",
            Attribute::required_int64().one_of_int(&[1, 2]),
        );

        // only the type error is reported
        assert_eq!(validate(&schema, &json!({"method": "POST"})).len(), 1);
    }

    #[test]
    fn test_validate_object_type() {
        let schema = Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("id", Attribute::id());
        let outer = Schema::v0().with_attribute(
            "tag",
            Attribute::new(schema.object_type(), crate::schema::AttributeFlags::required()),
        );

        assert!(validate(&outer, &json!({"tag": {"name": "x", "id": 1}})).is_empty());

        let diagnostics = validate(&outer, &json!({"tag": {"name": "x", "id": "1"}}));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute, Some("tag.id".to_string()));
    }

    #[test]
    fn test_validate_multiple_errors() {
        let schema = Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("priority", Attribute::required_int64())
            .with_attribute("enable", Attribute::required_bool());

        let diagnostics = validate(
            &schema,
            &json!({"name": 123, "priority": "high", "enable": "yes"}),
        );
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_validate_root_not_object() {
        let schema = Schema::v0().with_attribute("name", Attribute::required_string());

        let diagnostics = validate(&schema, &json!("not an object"));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].summary.contains("Expected object"));
    }
}
