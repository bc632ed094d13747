//! Custom formats.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{FieldReader, FieldWriter};
use super::ResourceModel;
use crate::client::models::{CustomFormatResource, CustomFormatSpecification};
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};

// Specifications whose `value` is a pattern rather than a number.
const TEXT_VALUED: &[&str] = &["ReleaseTitleSpecification", "ReleaseGroupSpecification"];

/// A named set of release matching rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFormat {
    /// Custom Format ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Expose the format to `{Custom Formats}` in file names.
    pub include_custom_format_when_renaming: Option<bool>,
    /// Matching rules.
    pub specifications: Option<Vec<Specification>>,
}

/// A custom format rule with its field values flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Specification {
    /// Rule name.
    pub name: Option<String>,
    /// Rule kind, e.g. `ReleaseTitleSpecification`.
    pub implementation: Option<String>,
    /// Invert the match.
    pub negate: Option<bool>,
    /// The rule must match for the format to apply.
    pub required: Option<bool>,
    /// Pattern or numeric value, always a string in state.
    pub value: Option<String>,
    /// Lower bound for size rules.
    pub min: Option<i64>,
    /// Upper bound for size rules.
    pub max: Option<i64>,
}

impl Specification {
    fn to_api(&self) -> CustomFormatSpecification {
        let implementation = self.implementation.clone().unwrap_or_default();
        let value = self.value.as_ref().map(|v| {
            match v.parse::<i64>() {
                Ok(n) if !TEXT_VALUED.contains(&implementation.as_str()) => Value::from(n),
                _ => Value::from(v.as_str()),
            }
        });

        CustomFormatSpecification {
            name: self.name.clone().unwrap_or_default(),
            negate: self.negate.unwrap_or_default(),
            required: self.required.unwrap_or_default(),
            fields: FieldWriter::new()
                .set("value", &value)
                .set("min", &self.min)
                .set("max", &self.max)
                .finish(),
            implementation,
        }
    }
}

impl From<&CustomFormatSpecification> for Specification {
    fn from(rule: &CustomFormatSpecification) -> Self {
        let fields = FieldReader::new(&rule.fields);
        // Numeric values (e.g. a release type) are exposed as strings.
        let value = fields.get::<Value>("value").map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        });

        Self {
            name: Some(rule.name.clone()),
            implementation: Some(rule.implementation.clone()),
            negate: Some(rule.negate),
            required: Some(rule.required),
            value,
            min: fields.get("min"),
            max: fields.get("max"),
        }
    }
}

fn specification_type() -> AttributeType {
    AttributeType::object(BTreeMap::from([
        ("name".to_string(), AttributeType::String),
        ("implementation".to_string(), AttributeType::String),
        ("negate".to_string(), AttributeType::Bool),
        ("required".to_string(), AttributeType::Bool),
        ("value".to_string(), AttributeType::String),
        ("min".to_string(), AttributeType::Int64),
        ("max".to_string(), AttributeType::Int64),
    ]))
}

impl ResourceModel for CustomFormat {
    type Dto = CustomFormatResource;

    const NAME: &'static str = "custom_format";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Custom Format resource.")
            .with_attribute("id", Attribute::id().with_description("Custom Format ID."))
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Custom Format name."),
            )
            .with_attribute(
                "include_custom_format_when_renaming",
                Attribute::optional_bool()
                    .with_default(serde_json::json!(false))
                    .with_description("Include custom format when renaming flag."),
            )
            .with_attribute(
                "specifications",
                Attribute::new(
                    AttributeType::set(specification_type()),
                    AttributeFlags::required(),
                )
                .with_description("Specifications."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.custom_formats()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> CustomFormatResource {
        CustomFormatResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            include_custom_format_when_renaming: self
                .include_custom_format_when_renaming
                .unwrap_or_default(),
            specifications: self
                .specifications
                .iter()
                .flatten()
                .map(Specification::to_api)
                .collect(),
        }
    }

    fn write_api(&mut self, dto: &CustomFormatResource) {
        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            include_custom_format_when_renaming: Some(dto.include_custom_format_when_renaming),
            specifications: Some(dto.specifications.iter().map(Specification::from).collect()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Field;
    use crate::resources::tests::assert_schema_matches_model;
    use serde_json::json;

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<CustomFormat>();
    }

    #[test]
    fn test_specification_value_as_string() {
        let rule = CustomFormatSpecification {
            name: "Lossless".to_string(),
            implementation: "ReleaseTitleSpecification".to_string(),
            negate: false,
            required: true,
            fields: vec![Field::new("value", json!(3))],
        };
        let rule = Specification::from(&rule);
        assert_eq!(rule.value.as_deref(), Some("3"));
        assert_eq!(rule.min, None);
    }

    #[test]
    fn test_size_specification() {
        let rule = CustomFormatSpecification {
            name: "Small".to_string(),
            implementation: "SizeSpecification".to_string(),
            fields: vec![Field::new("min", json!(0)), Field::new("max", json!(100))],
            ..Default::default()
        };
        let rule = Specification::from(&rule);
        assert_eq!(rule.value, None);
        assert_eq!((rule.min, rule.max), (Some(0), Some(100)));
    }

    #[test]
    fn test_to_api_value_types() {
        let format = CustomFormat {
            name: Some("retail".to_string()),
            specifications: Some(vec![
                Specification {
                    name: Some("title".to_string()),
                    implementation: Some("ReleaseTitleSpecification".to_string()),
                    value: Some("1984".to_string()),
                    ..Default::default()
                },
                Specification {
                    name: Some("flag".to_string()),
                    implementation: Some("IndexerFlagSpecification".to_string()),
                    value: Some("8".to_string()),
                    required: Some(true),
                    ..Default::default()
                },
                Specification {
                    name: Some("size".to_string()),
                    implementation: Some("SizeSpecification".to_string()),
                    min: Some(1),
                    max: Some(20),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };

        let dto = format.to_api();
        assert_eq!(dto.specifications[0].fields, vec![Field::new("value", json!("1984"))]);
        assert_eq!(dto.specifications[1].fields, vec![Field::new("value", json!(8))]);
        assert!(dto.specifications[1].required);
        assert_eq!(
            dto.specifications[2].fields,
            vec![Field::new("min", json!(1)), Field::new("max", json!(20))]
        );
    }

    #[test]
    fn test_state_specification_accepts_missing_keys() {
        let format: CustomFormat = serde_json::from_value(json!({
            "name": "epub",
            "specifications": [{"name": "epub", "implementation": "ReleaseTitleSpecification"}]
        }))
        .unwrap();
        let rule = &format.specifications.unwrap()[0];
        assert_eq!(rule.value, None);
        assert_eq!(rule.negate, None);
    }
}
