//! Schema-driven planning.
//!
//! Every resource plans the same way: configured values win, null values of
//! attributes with a static default take the default, and computed
//! attributes the configuration leaves out keep their prior value. Without a
//! prior value (on create) they stay null until the API fills them in on
//! apply, so null stands for "unknown" in a planned state.

use serde_json::{Map, Value};

use crate::schema::{AttributeType, Schema};
use crate::types::{AttributeChange, PlanResult};

/// Compute the planned state and attribute changes for one resource.
///
/// `prior` is `None` when the resource is being created. A null `proposed`
/// value plans a destroy.
pub fn plan(schema: &Schema, prior: Option<&Value>, proposed: &Value, config: &Value) -> PlanResult {
    let prior = prior.filter(|p| !p.is_null());

    if proposed.is_null() {
        return plan_destroy(schema, prior);
    }

    let mut planned = Map::new();
    let mut changes = Vec::new();
    let mut requires_replace = false;

    for (name, attr) in &schema.block.attributes {
        let prior_value = prior.and_then(|p| non_null(p.get(name)));

        let value = non_null(config.get(name))
            .or_else(|| non_null(proposed.get(name)))
            .map(|v| normalize(&attr.attr_type, v))
            .or_else(|| attr.default.clone())
            .or_else(|| {
                (attr.flags.computed && (attr.flags.optional || attr.use_state_for_unknown))
                    .then(|| prior_value.cloned())
                    .flatten()
            });

        let unknown = value.is_none() && attr.flags.computed;
        if !unknown && !same_value(&attr.attr_type, prior_value, value.as_ref()) {
            if prior.is_some() && attr.force_new {
                requires_replace = true;
            }
            changes.push(AttributeChange::new(
                name.clone(),
                prior_value.cloned(),
                value.clone(),
            ));
        }

        planned.insert(name.clone(), value.unwrap_or(Value::Null));
    }

    PlanResult {
        planned_state: Value::Object(planned),
        changes,
        requires_replace,
    }
}

fn plan_destroy(schema: &Schema, prior: Option<&Value>) -> PlanResult {
    let changes = prior
        .map(|p| {
            schema
                .block
                .attributes
                .keys()
                .filter_map(|name| {
                    non_null(p.get(name))
                        .map(|v| AttributeChange::new(name.clone(), Some(v.clone()), None))
                })
                .collect()
        })
        .unwrap_or_default();

    PlanResult {
        planned_state: Value::Null,
        changes,
        requires_replace: false,
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Rewrite whole-number floats as integers wherever `attr_type` holds int64s.
pub(crate) fn normalize(attr_type: &AttributeType, value: &Value) -> Value {
    match (attr_type, value) {
        (AttributeType::Int64, Value::Number(n)) if !n.is_i64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| Value::from(f as i64))
            .unwrap_or_else(|| value.clone()),
        (AttributeType::Set(element), Value::Array(items)) => {
            Value::Array(items.iter().map(|v| normalize(element, v)).collect())
        }
        (AttributeType::Object(attrs), Value::Object(obj)) => Value::Object(
            obj.iter()
                .map(|(k, v)| {
                    let v = attrs.get(k).map_or_else(|| v.clone(), |t| normalize(t, v));
                    (k.clone(), v)
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Normalize every attribute of a state object against `schema`.
pub(crate) fn normalize_state(schema: &Schema, state: &mut Value) {
    if let Value::Object(obj) = state {
        for (name, value) in obj.iter_mut() {
            if let Some(attr) = schema.attribute(name) {
                *value = normalize(&attr.attr_type, value);
            }
        }
    }
}

/// Compare two attribute values, treating sets as unordered.
fn same_value(attr_type: &AttributeType, a: Option<&Value>, b: Option<&Value>) -> bool {
    match (attr_type, a, b) {
        (AttributeType::Set(_), Some(Value::Array(a)), Some(Value::Array(b))) => {
            a.len() == b.len() && a.iter().all(|x| b.contains(x))
        }
        (AttributeType::Float64 | AttributeType::Int64, Some(a), Some(b)) => {
            a.as_f64() == b.as_f64()
        }
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::v0()
            .with_attribute("name", Attribute::required_string())
            .with_attribute("tags", Attribute::optional_int_set())
            .with_attribute(
                "priority",
                Attribute::optional_int64().with_default(json!(1)),
            )
            .with_attribute("host", Attribute::required_string().with_force_new())
            .with_attribute("id", Attribute::id())
    }

    #[test]
    fn test_plan_create_applies_defaults() {
        let config = json!({"name": "qbit", "host": "localhost"});
        let result = plan(&schema(), None, &config, &config);

        assert_eq!(result.planned_state["priority"], 1);
        assert!(result.planned_state["id"].is_null());
        assert!(result.planned_state["tags"].is_null());
        assert!(!result.requires_replace);

        let paths: Vec<_> = result.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["host", "name", "priority"]);
    }

    #[test]
    fn test_plan_update_keeps_id() {
        let prior = json!({"name": "qbit", "host": "localhost", "priority": 1, "tags": [1, 2], "id": 7});
        let config = json!({"name": "renamed", "host": "localhost", "tags": [2, 1]});
        let result = plan(&schema(), Some(&prior), &config, &config);

        assert_eq!(result.planned_state["id"], 7);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(result.changes[0].path, "name");
        assert_eq!(result.changes[0].before, Some(json!("qbit")));
        assert_eq!(result.changes[0].after, Some(json!("renamed")));
        assert!(!result.requires_replace);
    }

    #[test]
    fn test_plan_update_keeps_unconfigured_computed() {
        let prior = json!({"name": "qbit", "host": "localhost", "priority": 7, "tags": [1], "id": 7});
        let config = json!({"name": "renamed", "host": "localhost"});
        let result = plan(&schema(), Some(&prior), &config, &config);

        assert_eq!(result.planned_state["tags"], json!([1]));
        assert_eq!(result.planned_state["priority"], 1);
        let paths: Vec<_> = result.changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "priority"]);
    }

    #[test]
    fn test_plan_normalizes_whole_floats() {
        let config = json!({"name": "qbit", "host": "localhost", "priority": 3.0, "tags": [1.0, 2]});
        let result = plan(&schema(), None, &config, &config);

        assert!(result.planned_state["priority"].is_i64());
        assert_eq!(result.planned_state["tags"], json!([1, 2]));
    }

    #[test]
    fn test_normalize_state_leaves_fractions() {
        let mut state = json!({"priority": 1.5, "name": "x", "unknown": 2.0});
        normalize_state(&schema(), &mut state);
        assert_eq!(state["priority"], json!(1.5));
        assert_eq!(state["unknown"], json!(2.0));
    }

    #[test]
    fn test_plan_no_changes() {
        let prior = json!({"name": "qbit", "host": "localhost", "priority": 1, "tags": [1], "id": 7});
        let config = json!({"name": "qbit", "host": "localhost", "tags": [1]});
        let result = plan(&schema(), Some(&prior), &config, &config);

        assert!(!result.has_changes());
        assert_eq!(result.planned_state, prior);
    }

    #[test]
    fn test_plan_force_new_requires_replace() {
        let prior = json!({"name": "qbit", "host": "localhost", "priority": 1, "id": 7});
        let config = json!({"name": "qbit", "host": "remote"});
        let result = plan(&schema(), Some(&prior), &config, &config);

        assert!(result.requires_replace);
    }

    #[test]
    fn test_plan_destroy() {
        let prior = json!({"name": "qbit", "host": "localhost", "priority": 1, "id": 7, "tags": null});
        let result = plan(&schema(), Some(&prior), &Value::Null, &Value::Null);

        assert!(result.planned_state.is_null());
        assert_eq!(result.changes.len(), 4);
        assert!(result.changes.iter().all(|c| c.after.is_none()));
    }

    #[test]
    fn test_same_value_numbers() {
        assert!(same_value(
            &AttributeType::Float64,
            Some(&json!(1)),
            Some(&json!(1.0))
        ));
        assert!(!same_value(
            &AttributeType::set(AttributeType::Int64),
            Some(&json!([1, 2])),
            Some(&json!([1]))
        ));
    }
}
