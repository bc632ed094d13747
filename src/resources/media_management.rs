//! The media management config singleton.

use serde::{Deserialize, Serialize};

use super::settings::{SettingsModel, SETTINGS_ID};
use crate::client::models::MediaManagementConfigResource;
use crate::client::{ReadarrClient, Settings};
use crate::schema::{Attribute, Schema};

/// Import, file handling and permission settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaManagement {
    /// Always 1.
    pub id: Option<i64>,
    /// Unmonitor books whose files are deleted.
    pub auto_unmonitor_previously_downloaded_books: Option<bool>,
    /// Folder deleted files are moved to.
    pub recycle_bin: Option<String>,
    /// Days before the recycle bin is emptied.
    pub recycle_bin_cleanup_days: Option<i64>,
    /// How propers and repacks are treated.
    pub download_propers_and_repacks: Option<String>,
    /// Create author folders for authors without files.
    pub create_empty_author_folders: Option<bool>,
    /// Delete folders emptied by a move or delete.
    pub delete_empty_folders: Option<bool>,
    /// File date written on import.
    pub file_date: Option<String>,
    /// Rescan when files change on disk.
    pub watch_library_for_changes: Option<bool>,
    /// When an author refresh rescans the folder.
    pub rescan_after_refresh: Option<String>,
    /// When audio fingerprinting is used.
    pub allow_fingerprinting: Option<String>,
    /// Apply `chmod_folder` and `chown_group` on Linux.
    pub set_permissions_linux: Option<bool>,
    /// Folder mode, e.g. `755`.
    pub chmod_folder: Option<String>,
    /// Group owning imported files.
    pub chown_group: Option<String>,
    /// Import without checking free space.
    pub skip_free_space_check_when_importing: Option<bool>,
    /// Megabytes that must stay free after an import.
    pub minimum_free_space_when_importing: Option<i64>,
    /// Hardlink instead of copy when possible.
    pub copy_using_hardlinks: Option<bool>,
    /// Import matching extra files.
    pub import_extra_files: Option<bool>,
    /// Comma separated extra file extensions.
    pub extra_file_extensions: Option<String>,
}

impl SettingsModel for MediaManagement {
    type Dto = MediaManagementConfigResource;

    const NAME: &'static str = "media_management";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Media Management resource.")
            .with_attribute("id", Attribute::id().with_description("Media Management ID."))
            .with_attribute(
                "auto_unmonitor_previously_downloaded_books",
                Attribute::required_bool()
                    .with_description("Unmonitor deleted books."),
            )
            .with_attribute(
                "recycle_bin",
                Attribute::required_string().with_description("Recycle bin absolute path."),
            )
            .with_attribute(
                "recycle_bin_cleanup_days",
                Attribute::required_int64().with_description("Recycle bin days of retention."),
            )
            .with_attribute(
                "download_propers_and_repacks",
                Attribute::required_string()
                    .one_of_string(&["preferAndUpgrade", "doNotUpgrade", "doNotPrefer"])
                    .with_description("Download propers and repacks."),
            )
            .with_attribute(
                "create_empty_author_folders",
                Attribute::required_bool().with_description("Create empty author directories."),
            )
            .with_attribute(
                "delete_empty_folders",
                Attribute::required_bool().with_description("Delete empty author directories."),
            )
            .with_attribute(
                "file_date",
                Attribute::required_string()
                    .one_of_string(&["none", "bookReleaseDate"])
                    .with_description("Define the file date modification."),
            )
            .with_attribute(
                "watch_library_for_changes",
                Attribute::required_bool().with_description("Watch library for changes."),
            )
            .with_attribute(
                "rescan_after_refresh",
                Attribute::required_string()
                    .one_of_string(&["always", "afterManual", "never"])
                    .with_description("Rescan after refresh."),
            )
            .with_attribute(
                "allow_fingerprinting",
                Attribute::required_string()
                    .one_of_string(&["never", "newFiles", "allFiles"])
                    .with_description("Allow fingerprinting."),
            )
            .with_attribute(
                "set_permissions_linux",
                Attribute::required_bool().with_description("Set permission during import."),
            )
            .with_attribute(
                "chmod_folder",
                Attribute::required_string().with_description("Permission in linux format."),
            )
            .with_attribute(
                "chown_group",
                Attribute::required_string().with_description("Group used for permission."),
            )
            .with_attribute(
                "skip_free_space_check_when_importing",
                Attribute::required_bool().with_description("Skip free space check before importing."),
            )
            .with_attribute(
                "minimum_free_space_when_importing",
                Attribute::required_int64()
                    .with_description("Minimum free space in MB to allow import."),
            )
            .with_attribute(
                "copy_using_hardlinks",
                Attribute::required_bool().with_description("Use hardlinks instead of copy."),
            )
            .with_attribute(
                "import_extra_files",
                Attribute::required_bool().with_description("Import extra files."),
            )
            .with_attribute(
                "extra_file_extensions",
                Attribute::required_string()
                    .with_description("Comma separated list of extra files to import."),
            )
    }

    fn settings(client: &ReadarrClient) -> Settings<'_, Self::Dto> {
        client.media_management()
    }

    fn to_api(&self) -> MediaManagementConfigResource {
        MediaManagementConfigResource {
            id: SETTINGS_ID,
            auto_unmonitor_previously_downloaded_books: self
                .auto_unmonitor_previously_downloaded_books
                .unwrap_or_default(),
            recycle_bin: self.recycle_bin.clone().unwrap_or_default(),
            recycle_bin_cleanup_days: self.recycle_bin_cleanup_days.unwrap_or_default(),
            download_propers_and_repacks: self
                .download_propers_and_repacks
                .clone()
                .unwrap_or_default(),
            create_empty_author_folders: self.create_empty_author_folders.unwrap_or_default(),
            delete_empty_folders: self.delete_empty_folders.unwrap_or_default(),
            file_date: self.file_date.clone().unwrap_or_default(),
            watch_library_for_changes: self.watch_library_for_changes.unwrap_or_default(),
            rescan_after_refresh: self.rescan_after_refresh.clone().unwrap_or_default(),
            allow_fingerprinting: self.allow_fingerprinting.clone().unwrap_or_default(),
            set_permissions_linux: self.set_permissions_linux.unwrap_or_default(),
            chmod_folder: self.chmod_folder.clone().unwrap_or_default(),
            chown_group: self.chown_group.clone().unwrap_or_default(),
            skip_free_space_check_when_importing: self
                .skip_free_space_check_when_importing
                .unwrap_or_default(),
            minimum_free_space_when_importing: self
                .minimum_free_space_when_importing
                .unwrap_or_default(),
            copy_using_hardlinks: self.copy_using_hardlinks.unwrap_or_default(),
            import_extra_files: self.import_extra_files.unwrap_or_default(),
            extra_file_extensions: self.extra_file_extensions.clone().unwrap_or_default(),
        }
    }

    fn from_api(dto: &MediaManagementConfigResource) -> Self {
        Self {
            id: Some(dto.id),
            auto_unmonitor_previously_downloaded_books: Some(
                dto.auto_unmonitor_previously_downloaded_books,
            ),
            recycle_bin: Some(dto.recycle_bin.clone()),
            recycle_bin_cleanup_days: Some(dto.recycle_bin_cleanup_days),
            download_propers_and_repacks: Some(dto.download_propers_and_repacks.clone()),
            create_empty_author_folders: Some(dto.create_empty_author_folders),
            delete_empty_folders: Some(dto.delete_empty_folders),
            file_date: Some(dto.file_date.clone()),
            watch_library_for_changes: Some(dto.watch_library_for_changes),
            rescan_after_refresh: Some(dto.rescan_after_refresh.clone()),
            allow_fingerprinting: Some(dto.allow_fingerprinting.clone()),
            set_permissions_linux: Some(dto.set_permissions_linux),
            chmod_folder: Some(dto.chmod_folder.clone()),
            chown_group: Some(dto.chown_group.clone()),
            skip_free_space_check_when_importing: Some(dto.skip_free_space_check_when_importing),
            minimum_free_space_when_importing: Some(dto.minimum_free_space_when_importing),
            copy_using_hardlinks: Some(dto.copy_using_hardlinks),
            import_extra_files: Some(dto.import_extra_files),
            extra_file_extensions: Some(dto.extra_file_extensions.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::settings::SettingsResource;
    use crate::resources::Resource;
    use crate::validation::validate;
    use secrecy::SecretString;
    use serde_json::{json, Value};
    use url::Url;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body() -> Value {
        json!({
            "id": 1,
            "autoUnmonitorPreviouslyDownloadedBooks": false,
            "recycleBin": "",
            "recycleBinCleanupDays": 7,
            "downloadPropersAndRepacks": "preferAndUpgrade",
            "createEmptyAuthorFolders": false,
            "deleteEmptyFolders": false,
            "fileDate": "none",
            "watchLibraryForChanges": true,
            "rescanAfterRefresh": "always",
            "allowFingerprinting": "newFiles",
            "setPermissionsLinux": false,
            "chmodFolder": "755",
            "chownGroup": "",
            "skipFreeSpaceCheckWhenImporting": false,
            "minimumFreeSpaceWhenImporting": 100,
            "copyUsingHardlinks": true,
            "importExtraFiles": false,
            "extraFileExtensions": "srt"
        })
    }

    fn client(uri: &str) -> ReadarrClient {
        ReadarrClient::new(&Url::parse(uri).unwrap(), &SecretString::from("key")).unwrap()
    }

    #[test]
    fn test_schema_matches_model() {
        let state = serde_json::to_value(MediaManagement::default()).unwrap();
        let schema = MediaManagement::schema();
        assert_eq!(state.as_object().unwrap().len(), schema.block.attributes.len());
        assert!(state
            .as_object()
            .unwrap()
            .keys()
            .all(|k| schema.attribute(k).is_some()));
    }

    #[test]
    fn test_validators() {
        let mut config = serde_json::to_value(MediaManagement::from_api(
            &serde_json::from_value(body()).unwrap(),
        ))
        .unwrap();
        assert!(validate(&MediaManagement::schema(), &config).is_empty());

        config["file_date"] = json!("albumReleaseDate");
        let diags = validate(&MediaManagement::schema(), &config);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].attribute.as_deref(), Some("file_date"));
    }

    #[tokio::test]
    async fn test_update_puts_whole_config() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/config/mediamanagement/1"))
            .and(body_partial_json(json!({
                "id": 1,
                "recycleBin": "/trash",
                "minimumFreeSpaceWhenImporting": 100,
                "copyUsingHardlinks": true
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json({
                let mut updated = body();
                updated["recycleBin"] = json!("/trash");
                updated
            }))
            .expect(1)
            .mount(&server)
            .await;

        let prior = serde_json::to_value(MediaManagement::from_api(
            &serde_json::from_value(body()).unwrap(),
        ))
        .unwrap();
        let mut planned = prior.clone();
        planned["recycle_bin"] = json!("/trash");

        let state = SettingsResource::<MediaManagement>::new()
            .update(&client(&server.uri()), prior, planned)
            .await
            .unwrap();
        assert_eq!(state["recycle_bin"], "/trash");
        assert_eq!(state["chmod_folder"], "755");
    }
}
