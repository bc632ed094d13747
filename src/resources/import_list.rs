//! Import lists.
//!
//! Lists that feed authors and books into Readarr. Like download clients the
//! implementation settings travel in `fields`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::fields::{FieldReader, FieldWriter};
use super::{variant_model, ResourceModel};
use crate::client::models::ImportListResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

const LAZY_LIBRARIAN: (&str, &str, &str) =
    ("LazyLibrarianImport", "LazyLibrarianImportSettings", "program");
const READARR: (&str, &str, &str) = ("ReadarrImport", "ReadarrSettings", "program");

const MONITOR_OPTIONS: &[&str] = &["none", "specificBook", "entireAuthor"];
const NEW_ITEM_OPTIONS: &[&str] = &["all", "none", "new"];

fn base_schema(description: &str) -> Schema {
    Schema::v0()
        .with_description(description)
        .with_attribute("id", Attribute::id().with_description("Import List ID."))
        .with_attribute(
            "name",
            Attribute::required_string().with_description("Import List name."),
        )
        .with_attribute(
            "enable_automatic_add",
            Attribute::optional_bool().with_description("Enable automatic add flag."),
        )
        .with_attribute(
            "should_monitor",
            Attribute::required_string()
                .one_of_string(MONITOR_OPTIONS)
                .with_description("Should monitor."),
        )
        .with_attribute(
            "should_monitor_existing",
            Attribute::optional_bool().with_description("Should monitor existing flag."),
        )
        .with_attribute(
            "should_search",
            Attribute::optional_bool().with_description("Should search flag."),
        )
        .with_attribute(
            "monitor_new_items",
            Attribute::optional_string()
                .one_of_string(NEW_ITEM_OPTIONS)
                .with_description("Monitor new items."),
        )
        .with_attribute(
            "root_folder_path",
            Attribute::required_string().with_description("Root folder path."),
        )
        .with_attribute(
            "quality_profile_id",
            Attribute::required_int64().with_description("Quality profile ID."),
        )
        .with_attribute(
            "metadata_profile_id",
            Attribute::required_int64().with_description("Metadata profile ID."),
        )
        .with_attribute(
            "list_order",
            Attribute::optional_int64().with_description("List order."),
        )
        .with_attribute(
            "tags",
            Attribute::optional_int_set().with_description("List of associated tags."),
        )
}

/// Generic import list: the common settings plus every supported field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportList {
    /// Import List ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Implementation, e.g. `ReadarrImport`.
    pub implementation: Option<String>,
    /// Settings contract of the implementation.
    pub config_contract: Option<String>,
    /// List kind, e.g. `program`.
    pub list_type: Option<String>,
    /// Add found authors without review.
    pub enable_automatic_add: Option<bool>,
    /// What to monitor for added items.
    pub should_monitor: Option<String>,
    /// Monitor items already in the library.
    pub should_monitor_existing: Option<bool>,
    /// Search for added books.
    pub should_search: Option<bool>,
    /// Which future books to monitor.
    pub monitor_new_items: Option<String>,
    /// Root folder for added authors.
    pub root_folder_path: Option<String>,
    /// Quality profile for added authors.
    pub quality_profile_id: Option<i64>,
    /// Metadata profile for added authors.
    pub metadata_profile_id: Option<i64>,
    /// Sync order.
    pub list_order: Option<i64>,
    /// Tags applied to added authors.
    pub tags: Option<BTreeSet<i64>>,
    /// Source instance URL.
    pub base_url: Option<String>,
    /// Source instance API key.
    pub api_key: Option<String>,
    /// Source quality profiles to import from.
    pub profile_ids: Option<BTreeSet<i64>>,
    /// Source tags to import from.
    pub tag_ids: Option<BTreeSet<i64>>,
}

impl ImportList {
    fn pinned(mut self, (implementation, config_contract, list_type): (&str, &str, &str)) -> Self {
        self.implementation = Some(implementation.to_string());
        self.config_contract = Some(config_contract.to_string());
        self.list_type = Some(list_type.to_string());
        self
    }
}

impl ResourceModel for ImportList {
    type Dto = ImportListResource;

    const NAME: &'static str = "import_list";

    fn schema() -> Schema {
        base_schema("Generic Import List resource. When possible use a specific resource instead.")
            .with_attribute(
                "implementation",
                Attribute::required_string().with_description("ImportList implementation name."),
            )
            .with_attribute(
                "config_contract",
                Attribute::required_string().with_description("ImportList configuration template."),
            )
            .with_attribute(
                "list_type",
                Attribute::optional_string()
                    .one_of_string(&["program", "goodreads", "other"])
                    .with_description("List type."),
            )
            .with_attribute("base_url", Attribute::optional_string().with_description("Base URL."))
            .with_attribute(
                "api_key",
                Attribute::optional_string().sensitive().with_description("API key."),
            )
            .with_attribute(
                "profile_ids",
                Attribute::optional_int_set().with_description("Profile IDs."),
            )
            .with_attribute("tag_ids", Attribute::optional_int_set().with_description("Tag IDs."))
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.import_lists()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> ImportListResource {
        ImportListResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            implementation: self.implementation.clone().unwrap_or_default(),
            config_contract: self.config_contract.clone().unwrap_or_default(),
            list_type: self.list_type.clone().unwrap_or_default(),
            enable_automatic_add: self.enable_automatic_add.unwrap_or_default(),
            should_monitor: self.should_monitor.clone().unwrap_or_default(),
            should_monitor_existing: self.should_monitor_existing.unwrap_or_default(),
            should_search: self.should_search.unwrap_or_default(),
            monitor_new_items: self.monitor_new_items.clone().unwrap_or_default(),
            root_folder_path: self.root_folder_path.clone().unwrap_or_default(),
            quality_profile_id: self.quality_profile_id.unwrap_or_default(),
            metadata_profile_id: self.metadata_profile_id.unwrap_or_default(),
            list_order: self.list_order.unwrap_or_default(),
            tags: self.tags.iter().flatten().copied().collect(),
            fields: FieldWriter::new()
                .set("baseUrl", &self.base_url)
                .set("apiKey", &self.api_key)
                .set("profileIds", &self.profile_ids)
                .set("tagIds", &self.tag_ids)
                .finish(),
        }
    }

    fn write_api(&mut self, dto: &ImportListResource) {
        let fields = FieldReader::new(&dto.fields);
        let api_key = self.api_key.take();

        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            implementation: Some(dto.implementation.clone()),
            config_contract: Some(dto.config_contract.clone()),
            list_type: Some(dto.list_type.clone()),
            enable_automatic_add: Some(dto.enable_automatic_add),
            should_monitor: Some(dto.should_monitor.clone()),
            should_monitor_existing: Some(dto.should_monitor_existing),
            should_search: Some(dto.should_search),
            monitor_new_items: Some(dto.monitor_new_items.clone()),
            root_folder_path: Some(dto.root_folder_path.clone()),
            quality_profile_id: Some(dto.quality_profile_id),
            metadata_profile_id: Some(dto.metadata_profile_id),
            list_order: Some(dto.list_order),
            tags: Some(dto.tags.iter().copied().collect()),
            base_url: fields.get("baseUrl"),
            api_key: fields.sensitive("apiKey", api_key),
            profile_ids: fields.get("profileIds"),
            tag_ids: fields.get("tagIds"),
        };
    }
}

/// LazyLibrarian import list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportListLazyLibrarian {
    /// Import List ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Add found authors without review.
    pub enable_automatic_add: Option<bool>,
    /// What to monitor for added items.
    pub should_monitor: Option<String>,
    /// Monitor items already in the library.
    pub should_monitor_existing: Option<bool>,
    /// Search for added books.
    pub should_search: Option<bool>,
    /// Which future books to monitor.
    pub monitor_new_items: Option<String>,
    /// Root folder for added authors.
    pub root_folder_path: Option<String>,
    /// Quality profile for added authors.
    pub quality_profile_id: Option<i64>,
    /// Metadata profile for added authors.
    pub metadata_profile_id: Option<i64>,
    /// Sync order.
    pub list_order: Option<i64>,
    /// Tags applied to added authors.
    pub tags: Option<BTreeSet<i64>>,
    /// LazyLibrarian URL.
    pub base_url: Option<String>,
    /// LazyLibrarian API key.
    pub api_key: Option<String>,
}

impl ImportListLazyLibrarian {
    fn resource_schema() -> Schema {
        base_schema("Import List LazyLibrarian resource.")
            .with_attribute("base_url", Attribute::required_string().with_description("Base URL."))
            .with_attribute(
                "api_key",
                Attribute::required_string().sensitive().with_description("API key."),
            )
    }
}

impl From<ImportListLazyLibrarian> for ImportList {
    fn from(l: ImportListLazyLibrarian) -> Self {
        Self {
            id: l.id,
            name: l.name,
            enable_automatic_add: l.enable_automatic_add,
            should_monitor: l.should_monitor,
            should_monitor_existing: l.should_monitor_existing,
            should_search: l.should_search,
            monitor_new_items: l.monitor_new_items,
            root_folder_path: l.root_folder_path,
            quality_profile_id: l.quality_profile_id,
            metadata_profile_id: l.metadata_profile_id,
            list_order: l.list_order,
            tags: l.tags,
            base_url: l.base_url,
            api_key: l.api_key,
            ..Default::default()
        }
        .pinned(LAZY_LIBRARIAN)
    }
}

impl From<ImportList> for ImportListLazyLibrarian {
    fn from(l: ImportList) -> Self {
        Self {
            id: l.id,
            name: l.name,
            enable_automatic_add: l.enable_automatic_add,
            should_monitor: l.should_monitor,
            should_monitor_existing: l.should_monitor_existing,
            should_search: l.should_search,
            monitor_new_items: l.monitor_new_items,
            root_folder_path: l.root_folder_path,
            quality_profile_id: l.quality_profile_id,
            metadata_profile_id: l.metadata_profile_id,
            list_order: l.list_order,
            tags: l.tags,
            base_url: l.base_url,
            api_key: l.api_key,
        }
    }
}

variant_model!(
    ImportListLazyLibrarian,
    ImportList,
    "import_list_lazy_librarian"
);

/// Import list syncing from another Readarr instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportListReadarr {
    /// Import List ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Add found authors without review.
    pub enable_automatic_add: Option<bool>,
    /// What to monitor for added items.
    pub should_monitor: Option<String>,
    /// Monitor items already in the library.
    pub should_monitor_existing: Option<bool>,
    /// Search for added books.
    pub should_search: Option<bool>,
    /// Which future books to monitor.
    pub monitor_new_items: Option<String>,
    /// Root folder for added authors.
    pub root_folder_path: Option<String>,
    /// Quality profile for added authors.
    pub quality_profile_id: Option<i64>,
    /// Metadata profile for added authors.
    pub metadata_profile_id: Option<i64>,
    /// Sync order.
    pub list_order: Option<i64>,
    /// Tags applied to added authors.
    pub tags: Option<BTreeSet<i64>>,
    /// Source instance URL.
    pub base_url: Option<String>,
    /// Source instance API key.
    pub api_key: Option<String>,
    /// Source quality profiles to import from.
    pub profile_ids: Option<BTreeSet<i64>>,
    /// Source tags to import from.
    pub tag_ids: Option<BTreeSet<i64>>,
}

impl ImportListReadarr {
    fn resource_schema() -> Schema {
        base_schema("Import List Readarr resource.")
            .with_attribute(
                "base_url",
                Attribute::required_string().with_description("Full URL of the source instance."),
            )
            .with_attribute(
                "api_key",
                Attribute::required_string().sensitive().with_description("API key."),
            )
            .with_attribute(
                "profile_ids",
                Attribute::optional_int_set().with_description("Profile IDs."),
            )
            .with_attribute("tag_ids", Attribute::optional_int_set().with_description("Tag IDs."))
    }
}

impl From<ImportListReadarr> for ImportList {
    fn from(l: ImportListReadarr) -> Self {
        Self {
            id: l.id,
            name: l.name,
            enable_automatic_add: l.enable_automatic_add,
            should_monitor: l.should_monitor,
            should_monitor_existing: l.should_monitor_existing,
            should_search: l.should_search,
            monitor_new_items: l.monitor_new_items,
            root_folder_path: l.root_folder_path,
            quality_profile_id: l.quality_profile_id,
            metadata_profile_id: l.metadata_profile_id,
            list_order: l.list_order,
            tags: l.tags,
            base_url: l.base_url,
            api_key: l.api_key,
            profile_ids: l.profile_ids,
            tag_ids: l.tag_ids,
            ..Default::default()
        }
        .pinned(READARR)
    }
}

impl From<ImportList> for ImportListReadarr {
    fn from(l: ImportList) -> Self {
        Self {
            id: l.id,
            name: l.name,
            enable_automatic_add: l.enable_automatic_add,
            should_monitor: l.should_monitor,
            should_monitor_existing: l.should_monitor_existing,
            should_search: l.should_search,
            monitor_new_items: l.monitor_new_items,
            root_folder_path: l.root_folder_path,
            quality_profile_id: l.quality_profile_id,
            metadata_profile_id: l.metadata_profile_id,
            list_order: l.list_order,
            tags: l.tags,
            base_url: l.base_url,
            api_key: l.api_key,
            profile_ids: l.profile_ids,
            tag_ids: l.tag_ids,
        }
    }
}

variant_model!(ImportListReadarr, ImportList, "import_list_readarr");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Field;
    use crate::resources::fields::SENSITIVE_MASK;
    use crate::resources::tests::assert_schema_matches_model;
    use crate::validation::validate;
    use serde_json::json;

    #[test]
    fn test_schemas_match_models() {
        assert_schema_matches_model::<ImportList>();
        assert_schema_matches_model::<ImportListLazyLibrarian>();
        assert_schema_matches_model::<ImportListReadarr>();
    }

    #[test]
    fn test_lazy_librarian_to_api() {
        let list = ImportListLazyLibrarian {
            name: Some("LL".to_string()),
            should_monitor: Some("entireAuthor".to_string()),
            monitor_new_items: Some("none".to_string()),
            root_folder_path: Some("/config".to_string()),
            quality_profile_id: Some(1),
            metadata_profile_id: Some(1),
            base_url: Some("http://localhost:5299".to_string()),
            api_key: Some("APIKey".to_string()),
            ..Default::default()
        };

        let dto = list.to_api();
        assert_eq!(dto.implementation, "LazyLibrarianImport");
        assert_eq!(dto.config_contract, "LazyLibrarianImportSettings");
        assert_eq!(dto.list_type, "program");
        assert_eq!(dto.should_monitor, "entireAuthor");
        assert_eq!(
            dto.fields,
            vec![
                Field::new("baseUrl", json!("http://localhost:5299")),
                Field::new("apiKey", json!("APIKey")),
            ]
        );
    }

    #[test]
    fn test_readarr_keeps_masked_key() {
        let mut list = ImportListReadarr {
            id: Some(2),
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let dto = ImportListResource {
            id: 2,
            name: "Upstream".to_string(),
            implementation: "ReadarrImport".to_string(),
            should_monitor: "specificBook".to_string(),
            fields: vec![
                Field::new("baseUrl", json!("http://upstream:8787")),
                Field::new("apiKey", json!(SENSITIVE_MASK)),
                Field::new("profileIds", json!([1, 2])),
                Field::new("tagIds", json!([])),
            ],
            ..Default::default()
        };

        list.write_api(&dto);
        assert_eq!(list.api_key.as_deref(), Some("secret"));
        assert_eq!(list.profile_ids, Some(BTreeSet::from([1, 2])));
        assert_eq!(list.tag_ids, Some(BTreeSet::new()));
        assert_eq!(list.should_monitor.as_deref(), Some("specificBook"));
    }

    #[test]
    fn test_should_monitor_validator() {
        let config = json!({
            "name": "LL",
            "should_monitor": "everything",
            "root_folder_path": "/config",
            "quality_profile_id": 1,
            "metadata_profile_id": 1,
            "base_url": "http://localhost:5299",
            "api_key": "APIKey"
        });
        let diagnostics = validate(&ImportListLazyLibrarian::schema(), &config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("should_monitor"));
    }
}
