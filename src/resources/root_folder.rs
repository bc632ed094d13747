//! Root folders.

use serde::{Deserialize, Serialize};

use super::ResourceModel;
use crate::client::models::RootFolderResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};

const MONITOR_OPTIONS: &[&str] = &[
    "all", "future", "missing", "existing", "latest", "first", "none", "unknown",
];

const NEW_ITEM_MONITOR_OPTIONS: &[&str] = &["all", "none", "new"];

/// A library folder and the defaults applied to authors added under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootFolder {
    /// Root Folder ID.
    pub id: Option<i64>,
    /// Display name.
    pub name: Option<String>,
    /// Absolute path.
    pub path: Option<String>,
    /// Metadata profile for new authors.
    pub default_metadata_profile_id: Option<i64>,
    /// Quality profile for new authors.
    pub default_quality_profile_id: Option<i64>,
    /// Which existing books of a new author are monitored.
    pub default_monitor_option: Option<String>,
    /// Which future books of a new author are monitored.
    pub default_new_item_monitor_option: Option<String>,
    /// Tags for new authors.
    pub default_tags: Option<Vec<i64>>,
    /// The folder is a Calibre library.
    pub is_calibre_library: Option<bool>,
    /// Readarr can reach the path.
    pub accessible: Option<bool>,
}

impl ResourceModel for RootFolder {
    type Dto = RootFolderResource;

    const NAME: &'static str = "root_folder";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Root Folder resource.")
            .with_attribute("id", Attribute::id().with_description("Root Folder ID."))
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Root Folder friendly name."),
            )
            .with_attribute(
                "path",
                Attribute::required_string()
                    .with_force_new()
                    .with_description("Root Folder absolute path."),
            )
            .with_attribute(
                "default_metadata_profile_id",
                Attribute::required_int64().with_description("Default metadata profile ID."),
            )
            .with_attribute(
                "default_quality_profile_id",
                Attribute::required_int64().with_description("Default quality profile ID."),
            )
            .with_attribute(
                "default_monitor_option",
                Attribute::optional_string()
                    .with_default(serde_json::json!("all"))
                    .one_of_string(MONITOR_OPTIONS)
                    .with_description("Default monitor option."),
            )
            .with_attribute(
                "default_new_item_monitor_option",
                Attribute::optional_string()
                    .with_default(serde_json::json!("all"))
                    .one_of_string(NEW_ITEM_MONITOR_OPTIONS)
                    .with_description("Default new item monitor option."),
            )
            .with_attribute(
                "default_tags",
                Attribute::optional_int_set().with_description("Default list of associated tags."),
            )
            .with_attribute(
                "is_calibre_library",
                Attribute::optional_bool()
                    .with_default(serde_json::json!(false))
                    .with_force_new()
                    .with_description("Calibre library flag."),
            )
            .with_attribute(
                "accessible",
                Attribute::new(AttributeType::Bool, AttributeFlags::computed())
                    .with_description("Access flag."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.root_folders()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> RootFolderResource {
        RootFolderResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            path: self.path.clone().unwrap_or_default(),
            default_metadata_profile_id: self.default_metadata_profile_id.unwrap_or_default(),
            default_quality_profile_id: self.default_quality_profile_id.unwrap_or_default(),
            default_monitor_option: self.default_monitor_option.clone().unwrap_or_default(),
            default_new_item_monitor_option: self
                .default_new_item_monitor_option
                .clone()
                .unwrap_or_default(),
            default_tags: self.default_tags.clone().unwrap_or_default(),
            is_calibre_library: self.is_calibre_library.unwrap_or_default(),
            accessible: false,
        }
    }

    fn write_api(&mut self, dto: &RootFolderResource) {
        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            path: Some(dto.path.clone()),
            default_metadata_profile_id: Some(dto.default_metadata_profile_id),
            default_quality_profile_id: Some(dto.default_quality_profile_id),
            default_monitor_option: Some(dto.default_monitor_option.clone()),
            default_new_item_monitor_option: Some(dto.default_new_item_monitor_option.clone()),
            default_tags: Some(dto.default_tags.clone()),
            is_calibre_library: Some(dto.is_calibre_library),
            accessible: Some(dto.accessible),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::assert_schema_matches_model;
    use serde_json::json;

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<RootFolder>();
    }

    #[test]
    fn test_accessible_not_sent() {
        let folder = RootFolder {
            name: Some("Books".to_string()),
            path: Some("/books".to_string()),
            default_metadata_profile_id: Some(1),
            default_quality_profile_id: Some(1),
            accessible: Some(true),
            ..Default::default()
        };

        let body = serde_json::to_value(folder.to_api()).unwrap();
        assert_eq!(body["path"], "/books");
        assert_eq!(body["defaultMetadataProfileId"], 1);
        assert!(body.get("accessible").is_none());
    }

    #[test]
    fn test_write_api() {
        let dto: RootFolderResource = serde_json::from_value(json!({
            "id": 3,
            "name": "Audio",
            "path": "/audiobooks",
            "defaultMetadataProfileId": 2,
            "defaultQualityProfileId": 1,
            "defaultMonitorOption": "future",
            "defaultNewItemMonitorOption": "new",
            "defaultTags": [4],
            "isCalibreLibrary": false,
            "accessible": true
        }))
        .unwrap();

        let mut folder = RootFolder::default();
        folder.write_api(&dto);
        assert_eq!(folder.default_monitor_option.as_deref(), Some("future"));
        assert_eq!(folder.default_tags, Some(vec![4]));
        assert_eq!(folder.accessible, Some(true));
    }
}
