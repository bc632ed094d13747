//! Value types shared by the protocol layer and resource implementations.

use serde::{Deserialize, Serialize};

/// A change to a single attribute during a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// The attribute name.
    pub path: String,
    /// The value before the change (None if the attribute was null).
    pub before: Option<serde_json::Value>,
    /// The value after the change (None if the attribute becomes null or unknown).
    pub after: Option<serde_json::Value>,
}

impl AttributeChange {
    /// Create a new attribute change.
    pub fn new(
        path: impl Into<String>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        Self {
            path: path.into(),
            before,
            after,
        }
    }
}

impl From<AttributeChange> for crate::generated::AttributeChange {
    fn from(change: AttributeChange) -> Self {
        let encode = |v: Option<serde_json::Value>| {
            v.and_then(|v| serde_json::to_vec(&v).ok())
                .unwrap_or_default()
        };
        Self {
            path: change.path,
            before: encode(change.before),
            after: encode(change.after),
        }
    }
}

/// The result of a plan operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// The planned state after the operation (null when destroying).
    pub planned_state: serde_json::Value,
    /// The list of attribute changes.
    pub changes: Vec<AttributeChange>,
    /// Whether the resource requires replacement.
    pub requires_replace: bool,
}

impl PlanResult {
    /// Whether applying the plan does anything.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// A resource produced by an import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedResource {
    /// The resource type, e.g. `readarr_tag`.
    pub resource_type: String,
    /// The imported state.
    pub state: serde_json::Value,
}

impl ImportedResource {
    /// Create a new imported resource.
    pub fn new(resource_type: impl Into<String>, state: serde_json::Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            state,
        }
    }
}

/// Provider metadata returned by GetMetadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProviderMetadata {
    /// List of resource type names.
    pub resources: Vec<String>,
    /// List of data source type names.
    pub data_sources: Vec<String>,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
}

/// Server capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServerCapabilities {
    /// Whether the provider supports planning destroy operations.
    pub plan_destroy: bool,
}

/// The protocol version for the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// The handshake prefix output by providers.
pub const HANDSHAKE_PREFIX: &str = "HEMMER_PROVIDER";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attribute_change_to_proto() {
        let change = AttributeChange::new("label", Some(json!("old")), Some(json!("new")));
        let proto: crate::generated::AttributeChange = change.into();

        assert_eq!(proto.path, "label");
        assert_eq!(proto.before, br#""old""#.to_vec());
        assert_eq!(proto.after, br#""new""#.to_vec());

        let added: crate::generated::AttributeChange =
            AttributeChange::new("id", None, Some(json!(1))).into();
        assert!(added.before.is_empty());
        assert_eq!(added.after, b"1".to_vec());
    }

    #[test]
    fn test_imported_resource() {
        let imported = ImportedResource::new("readarr_tag", json!({"id": 3, "label": "books"}));
        assert_eq!(imported.resource_type, "readarr_tag");
        assert_eq!(imported.state["id"], 3);
    }

    #[test]
    fn test_protocol_constants() {
        assert_eq!(PROTOCOL_VERSION, 1);
        assert_eq!(HANDSHAKE_PREFIX, "HEMMER_PROVIDER");
    }
}
