//! Request/response bodies of the Readarr v1 API.
//!
//! Only the properties the provider manages are modelled; everything else
//! Readarr sends is ignored on read.

use serde::{Deserialize, Serialize};

fn is_zero(id: &i64) -> bool {
    *id == 0
}

/// One implementation-specific setting of a download client, indexer or
/// notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// camelCase setting name, e.g. `host` or `seedCriteria.seedRatio`.
    pub name: String,
    /// JSON value, absent when Readarr has nothing stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

/// `/api/v1/downloadclient`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadClientResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Implementation name, e.g. `QBittorrent`.
    pub implementation: String,
    /// Settings contract of the implementation.
    pub config_contract: String,
    /// `usenet` or `torrent`.
    pub protocol: String,
    /// Whether the client is used.
    pub enable: bool,
    /// Client priority, lower wins.
    pub priority: i64,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: bool,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: bool,
    /// Tag ids.
    pub tags: Vec<i64>,
    /// Implementation settings.
    pub fields: Vec<Field>,
}

/// `/api/v1/indexer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexerResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Implementation name, e.g. `Newznab`.
    pub implementation: String,
    /// Settings contract of the implementation.
    pub config_contract: String,
    /// `usenet` or `torrent`.
    pub protocol: String,
    /// Used for RSS sync.
    pub enable_rss: bool,
    /// Used for automatic searches.
    pub enable_automatic_search: bool,
    /// Used for interactive searches.
    pub enable_interactive_search: bool,
    /// Indexer priority, lower wins.
    pub priority: i64,
    /// Tag ids.
    pub tags: Vec<i64>,
    /// Implementation settings.
    pub fields: Vec<Field>,
}

/// `/api/v1/notification`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Implementation name, e.g. `Webhook`.
    pub implementation: String,
    /// Settings contract of the implementation.
    pub config_contract: String,
    /// Release grabbed.
    pub on_grab: bool,
    /// Release imported.
    pub on_release_import: bool,
    /// Existing file upgraded.
    pub on_upgrade: bool,
    /// Files renamed.
    pub on_rename: bool,
    /// Author deleted.
    pub on_author_delete: bool,
    /// Book deleted.
    pub on_book_delete: bool,
    /// Book file deleted.
    pub on_book_file_delete: bool,
    /// Book file deleted by an upgrade.
    pub on_book_file_delete_for_upgrade: bool,
    /// Health check failed.
    pub on_health_issue: bool,
    /// Download failed.
    pub on_download_failure: bool,
    /// Import failed.
    pub on_import_failure: bool,
    /// Book file tags rewritten.
    pub on_book_retag: bool,
    /// Readarr updated.
    pub on_application_update: bool,
    /// Also notify on health warnings.
    pub include_health_warnings: bool,
    /// Tag ids.
    pub tags: Vec<i64>,
    /// Implementation settings.
    pub fields: Vec<Field>,
}

/// `/api/v1/importlist`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportListResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Implementation name, e.g. `LazyLibrarianImport`.
    pub implementation: String,
    /// Settings contract of the implementation.
    pub config_contract: String,
    /// `program`, `goodreads`, `other` or `advanced`.
    pub list_type: String,
    /// Add list items without confirmation.
    pub enable_automatic_add: bool,
    /// `none`, `specificBook` or `entireAuthor`.
    pub should_monitor: String,
    /// Monitor items already in the library.
    pub should_monitor_existing: bool,
    /// Search for added items.
    pub should_search: bool,
    /// `all`, `none` or `new`.
    pub monitor_new_items: String,
    /// Root folder new authors go to.
    pub root_folder_path: String,
    /// Quality profile of new authors.
    pub quality_profile_id: i64,
    /// Metadata profile of new authors.
    pub metadata_profile_id: i64,
    /// Sort order among lists.
    pub list_order: i64,
    /// Tag ids.
    pub tags: Vec<i64>,
    /// Implementation settings.
    pub fields: Vec<Field>,
}

/// `/api/v1/delayprofile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DelayProfileResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Usenet releases allowed.
    pub enable_usenet: bool,
    /// Torrent releases allowed.
    pub enable_torrent: bool,
    /// `usenet` or `torrent`.
    pub preferred_protocol: String,
    /// Minutes to wait for usenet releases.
    pub usenet_delay: i64,
    /// Minutes to wait for torrent releases.
    pub torrent_delay: i64,
    /// Evaluation order, the default profile is last.
    pub order: i64,
    /// Tag ids.
    pub tags: Vec<i64>,
}

/// `/api/v1/releaseprofile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseProfileResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Whether the profile applies.
    pub enabled: bool,
    /// Terms a release must contain.
    pub required: Vec<String>,
    /// Terms a release must not contain.
    pub ignored: Vec<String>,
    /// Limit to one indexer, 0 for all.
    pub indexer_id: i64,
    /// Tag ids.
    pub tags: Vec<i64>,
}

/// A quality as referenced from a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quality {
    /// Quality id.
    pub id: i64,
    /// Quality name, e.g. `EPUB`.
    pub name: String,
}

/// One entry of a quality profile: a single quality or a named group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityProfileItem {
    /// Group id, absent for single qualities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Group name, absent for single qualities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The quality of a single-quality entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    /// Members of a group.
    pub items: Vec<QualityProfileItem>,
    /// Whether releases of this entry are wanted.
    pub allowed: bool,
}

/// Score of one custom format within a quality profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileFormatItem {
    /// Custom format id.
    pub format: i64,
    /// Custom format name.
    pub name: String,
    /// Score added when the format matches.
    pub score: i64,
}

/// `/api/v1/qualityprofile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityProfileResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Keep upgrading until the cutoff.
    pub upgrade_allowed: bool,
    /// Quality or group id at which upgrades stop.
    pub cutoff: i64,
    /// Allowed entries, most preferred last.
    pub items: Vec<QualityProfileItem>,
    /// Minimum custom format score for a release.
    pub min_format_score: i64,
    /// Custom format score at which upgrades stop.
    pub cutoff_format_score: i64,
    /// Custom format scores.
    pub format_items: Vec<ProfileFormatItem>,
}

/// `/api/v1/metadataprofile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataProfileResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Minimum Goodreads popularity.
    pub min_popularity: f64,
    /// Skip books without a release date.
    pub skip_missing_date: bool,
    /// Skip books without an ISBN or ASIN.
    pub skip_missing_isbn: bool,
    /// Skip parts and sets.
    pub skip_parts_and_sets: bool,
    /// Skip secondary series books.
    pub skip_series_secondary: bool,
    /// Comma separated ISO 639-3 language codes.
    pub allowed_languages: String,
    /// Minimum page count.
    pub min_pages: i64,
    /// Terms that exclude a book.
    pub ignored: Vec<String>,
}

/// `/api/v1/rootfolder`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RootFolderResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Absolute folder path.
    pub path: String,
    /// Metadata profile of authors added here.
    pub default_metadata_profile_id: i64,
    /// Quality profile of authors added here.
    pub default_quality_profile_id: i64,
    /// Which existing books of a new author to monitor.
    pub default_monitor_option: String,
    /// Which future books of a new author to monitor.
    pub default_new_item_monitor_option: String,
    /// Tags of authors added here.
    pub default_tags: Vec<i64>,
    /// The folder is a Calibre library.
    pub is_calibre_library: bool,
    /// Whether Readarr can reach the folder. Read only.
    #[serde(skip_serializing)]
    pub accessible: bool,
}

/// `/api/v1/tag`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Tag label.
    pub label: String,
}

/// `/api/v1/remotepathmapping`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemotePathMappingResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Download client host.
    pub host: String,
    /// Path as the download client reports it.
    pub remote_path: String,
    /// Path as Readarr sees it.
    pub local_path: String,
}

/// `/api/v1/config/naming`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingConfigResource {
    /// Always 1.
    pub id: i64,
    /// Rename imported files.
    pub rename_books: bool,
    /// Replace rather than remove illegal characters.
    pub replace_illegal_characters: bool,
    /// Colon replacement mode, 0 to 4.
    pub colon_replacement_format: i64,
    /// Book file name template.
    pub standard_book_format: String,
    /// Author folder name template.
    pub author_folder_format: String,
}

/// `/api/v1/config/mediamanagement`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaManagementConfigResource {
    /// Always 1.
    pub id: i64,
    /// Unmonitor books whose files are deleted.
    pub auto_unmonitor_previously_downloaded_books: bool,
    /// Folder deleted files are moved to.
    pub recycle_bin: String,
    /// Days before the recycle bin is emptied.
    pub recycle_bin_cleanup_days: i64,
    /// `preferAndUpgrade`, `doNotUpgrade` or `doNotPrefer`.
    pub download_propers_and_repacks: String,
    /// Create author folders for authors without files.
    pub create_empty_author_folders: bool,
    /// Delete folders emptied by a move or delete.
    pub delete_empty_folders: bool,
    /// `none` or `bookReleaseDate`.
    pub file_date: String,
    /// Rescan when files change on disk.
    pub watch_library_for_changes: bool,
    /// `always`, `afterManual` or `never`.
    pub rescan_after_refresh: String,
    /// `never`, `newFiles` or `allFiles`.
    pub allow_fingerprinting: String,
    /// Apply `chmod_folder` and `chown_group` on Linux.
    pub set_permissions_linux: bool,
    /// Folder mode, e.g. `755`.
    pub chmod_folder: String,
    /// Group owning imported files.
    pub chown_group: String,
    /// Import without checking free space.
    pub skip_free_space_check_when_importing: bool,
    /// Megabytes that must stay free after an import.
    pub minimum_free_space_when_importing: i64,
    /// Hardlink instead of copy when possible.
    pub copy_using_hardlinks: bool,
    /// Import matching extra files.
    pub import_extra_files: bool,
    /// Comma separated extra file extensions.
    pub extra_file_extensions: String,
}

/// `/api/v1/customformat`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomFormatResource {
    /// Object id, omitted on create.
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Offer the format in the renaming token.
    pub include_custom_format_when_renaming: bool,
    /// Matching rules.
    pub specifications: Vec<CustomFormatSpecification>,
}

/// One matching rule of a custom format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomFormatSpecification {
    /// Rule name.
    pub name: String,
    /// Rule kind, e.g. `ReleaseTitleSpecification`.
    pub implementation: String,
    /// Invert the match.
    pub negate: bool,
    /// The rule must match for the format to apply.
    pub required: bool,
    /// Rule settings (`value`, `min`, `max`).
    pub fields: Vec<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_download_client_from_api() {
        let body = json!({
            "id": 3,
            "name": "qbit",
            "implementation": "QBittorrent",
            "configContract": "QBittorrentSettings",
            "protocol": "torrent",
            "enable": true,
            "priority": 1,
            "removeCompletedDownloads": false,
            "removeFailedDownloads": true,
            "tags": [1],
            "fields": [
                {"name": "host", "value": "localhost"},
                {"name": "password"}
            ],
            "supportsOnGrab": true
        });

        let dto: DownloadClientResource = serde_json::from_value(body).unwrap();
        assert_eq!(dto.config_contract, "QBittorrentSettings");
        assert!(dto.remove_failed_downloads);
        assert_eq!(dto.fields[0].value, Some(json!("localhost")));
        assert_eq!(dto.fields[1].value, None);
    }

    #[test]
    fn test_new_object_omits_id() {
        let body = serde_json::to_value(TagResource {
            id: 0,
            label: "books".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({"label": "books"}));
    }

    #[test]
    fn test_naming_keeps_id() {
        let body = serde_json::to_value(NamingConfigResource {
            id: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body["id"], 1);
        assert_eq!(body["colonReplacementFormat"], 0);
    }
}
