//! Schema types for describing provider, resource and data source structure.
//!
//! Schemas drive validation, planning (defaults and state carry-over) and
//! what the engine is told about each type through `GetSchema`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The type of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    /// A string value.
    String,
    /// A 64-bit integer.
    Int64,
    /// A 64-bit floating point number.
    Float64,
    /// A boolean value.
    Bool,
    /// A set of unique values of a single type.
    Set(Box<AttributeType>),
    /// An object with a fixed set of attributes.
    Object(BTreeMap<String, AttributeType>),
}

impl AttributeType {
    /// Create a set type.
    pub fn set(element_type: AttributeType) -> Self {
        Self::Set(Box::new(element_type))
    }

    /// Create an object type.
    pub fn object(attributes: BTreeMap<String, AttributeType>) -> Self {
        Self::Object(attributes)
    }
}

/// Describes how an attribute can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttributeFlags {
    /// The attribute is required in configuration.
    pub required: bool,
    /// The attribute is optional in configuration.
    pub optional: bool,
    /// The attribute is computed by the provider.
    pub computed: bool,
    /// The attribute is sensitive and should be hidden in logs/UI.
    pub sensitive: bool,
}

impl AttributeFlags {
    /// Flags for a required attribute.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Default::default()
        }
    }

    /// Flags for an optional attribute that the API may fill in.
    pub fn optional_computed() -> Self {
        Self {
            optional: true,
            computed: true,
            ..Default::default()
        }
    }

    /// Flags for a read-only attribute.
    pub fn computed() -> Self {
        Self {
            computed: true,
            ..Default::default()
        }
    }

    /// Whether the attribute can only be set by the provider.
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// A constraint on the value of an attribute, checked during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// The integer must be one of the listed values.
    OneOfInt(Vec<i64>),
    /// The string must be one of the listed values.
    OneOfString(Vec<String>),
}

/// Describes a single attribute in a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The type of the attribute.
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    /// Flags describing how the attribute can be used.
    #[serde(flatten)]
    pub flags: AttributeFlags,
    /// Human-readable description of the attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// If set, changing this attribute forces resource replacement.
    #[serde(default)]
    pub force_new: bool,
    /// Value planned when configuration leaves the attribute null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Keep the prior state value while planning instead of leaving it unknown.
    #[serde(default)]
    pub use_state_for_unknown: bool,
    /// Value constraints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl Attribute {
    /// Create a new attribute with the given type and flags.
    pub fn new(attr_type: AttributeType, flags: AttributeFlags) -> Self {
        Self {
            attr_type,
            flags,
            description: None,
            force_new: false,
            default: None,
            use_state_for_unknown: false,
            validators: Vec::new(),
        }
    }

    /// A required string.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::required())
    }

    /// An optional string the API may fill in.
    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::optional_computed())
    }

    /// A read-only string.
    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, AttributeFlags::computed())
    }

    /// A required int64.
    pub fn required_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::required())
    }

    /// An optional int64 the API may fill in.
    pub fn optional_int64() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::optional_computed())
    }

    /// The numeric object id: read-only and stable across plans.
    pub fn id() -> Self {
        Self::new(AttributeType::Int64, AttributeFlags::computed()).with_use_state_for_unknown()
    }

    /// A required bool.
    pub fn required_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::required())
    }

    /// An optional bool the API may fill in.
    pub fn optional_bool() -> Self {
        Self::new(AttributeType::Bool, AttributeFlags::optional_computed())
    }

    /// An optional float64 the API may fill in.
    pub fn optional_float64() -> Self {
        Self::new(AttributeType::Float64, AttributeFlags::optional_computed())
    }

    /// An optional set of int64 values.
    pub fn optional_int_set() -> Self {
        Self::new(
            AttributeType::set(AttributeType::Int64),
            AttributeFlags::optional_computed(),
        )
    }

    /// A required set of int64 values.
    pub fn required_int_set() -> Self {
        Self::new(
            AttributeType::set(AttributeType::Int64),
            AttributeFlags::required(),
        )
    }

    /// An optional set of strings.
    pub fn optional_string_set() -> Self {
        Self::new(
            AttributeType::set(AttributeType::String),
            AttributeFlags::optional_computed(),
        )
    }

    /// Set the description for this attribute.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark this attribute as forcing resource replacement when changed.
    pub fn with_force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    /// Set a default value for this attribute.
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Carry the prior state value through plans.
    pub fn with_use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    /// Restrict an integer attribute to the given values.
    pub fn one_of_int(mut self, values: &[i64]) -> Self {
        self.validators.push(Validator::OneOfInt(values.to_vec()));
        self
    }

    /// Restrict a string attribute to the given values.
    pub fn one_of_string(mut self, values: &[&str]) -> Self {
        self.validators.push(Validator::OneOfString(
            values.iter().map(|v| v.to_string()).collect(),
        ));
        self
    }

    /// Mark this attribute as sensitive.
    pub fn sensitive(mut self) -> Self {
        self.flags.sensitive = true;
        self
    }

    /// Turn this attribute into a read-only one, dropping config-only settings.
    fn into_computed(self) -> Self {
        Self {
            flags: AttributeFlags {
                sensitive: self.flags.sensitive,
                ..AttributeFlags::computed()
            },
            default: None,
            force_new: false,
            use_state_for_unknown: false,
            validators: Vec::new(),
            ..self
        }
    }
}

/// The attribute container of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Block {
    /// The attributes within this block.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Attribute>,
    /// Human-readable description of the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Schema for a resource or data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// The version of this schema (for state upgrades).
    #[serde(default)]
    pub version: u64,
    /// The root block containing all attributes.
    #[serde(flatten)]
    pub block: Block,
}

impl Schema {
    /// Create a new schema with the given version.
    pub fn new(version: u64) -> Self {
        Self {
            version,
            block: Block::default(),
        }
    }

    /// Create a schema at version 0.
    pub fn v0() -> Self {
        Self::new(0)
    }

    /// Add an attribute to the schema.
    pub fn with_attribute(mut self, name: impl Into<String>, attr: Attribute) -> Self {
        self.block.attributes.insert(name.into(), attr);
        self
    }

    /// Set the description of the schema.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.block.description = Some(description.into());
        self
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attributes.get(name)
    }

    /// Derive a lookup data source schema from a resource schema.
    ///
    /// `lookup` becomes the single required attribute; everything else is
    /// read-only.
    pub fn into_lookup(self, lookup: &str) -> Self {
        let attributes = self
            .block
            .attributes
            .into_iter()
            .map(|(name, attr)| {
                let attr_type = attr.attr_type.clone();
                let attr = if name == lookup {
                    Attribute::new(attr_type, AttributeFlags::required())
                } else {
                    attr.into_computed()
                };
                (name, attr)
            })
            .collect();

        Self {
            version: self.version,
            block: Block {
                attributes,
                description: self.block.description,
            },
        }
    }

    /// Derive a data source schema where every attribute is read-only.
    pub fn into_computed(self) -> Self {
        Self {
            version: self.version,
            block: Block {
                attributes: self
                    .block
                    .attributes
                    .into_iter()
                    .map(|(name, attr)| (name, attr.into_computed()))
                    .collect(),
                description: self.block.description,
            },
        }
    }

    /// Whether any attribute is sensitive.
    pub fn has_sensitive(&self) -> bool {
        self.block.attributes.values().any(|a| a.flags.sensitive)
    }

    /// The object type describing one element of this schema.
    pub fn object_type(&self) -> AttributeType {
        AttributeType::object(
            self.block
                .attributes
                .iter()
                .map(|(name, attr)| (name.clone(), attr.attr_type.clone()))
                .collect(),
        )
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::v0()
    }
}

/// Schemas for the provider configuration, resources and data sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProviderSchema {
    /// Schema for provider configuration.
    #[serde(default)]
    pub provider: Schema,
    /// Schemas for each resource type.
    #[serde(default)]
    pub resources: BTreeMap<String, Schema>,
    /// Schemas for each data source type.
    #[serde(default)]
    pub data_sources: BTreeMap<String, Schema>,
}

impl ProviderSchema {
    /// Create a new empty provider schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider configuration schema.
    pub fn with_provider_config(mut self, schema: Schema) -> Self {
        self.provider = schema;
        self
    }

    /// Add a resource schema.
    pub fn with_resource(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.resources.insert(name.into(), schema);
        self
    }

    /// Add a data source schema.
    pub fn with_data_source(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.data_sources.insert(name.into(), schema);
        self
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// An error that prevents the operation from completing.
    Error,
    /// A warning that doesn't prevent the operation but should be addressed.
    Warning,
}

/// A diagnostic message from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// A short summary of the issue.
    pub summary: String,
    /// A detailed description of the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// The attribute path where the issue occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            summary: summary.into(),
            detail: None,
            attribute: None,
        }
    }

    /// Add detail to this diagnostic.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Set the attribute path for this diagnostic.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Whether this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}
