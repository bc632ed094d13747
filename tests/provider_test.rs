#![allow(clippy::unwrap_used)]
// End-to-end tests of the provider against a fake Readarr API.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use readarr_provider::testing::{
    assert_error_contains, assert_plan_changes_attribute, assert_plan_creates,
    assert_plan_no_changes, ProviderTester,
};
use readarr_provider::{ProviderError, ProviderService};

// ── Helpers ─────────────────────────────────────────────────────────

const API_KEY: &str = "0123456789abcdef";

async fn setup() -> (MockServer, ProviderTester) {
    let server = MockServer::start().await;
    let tester = ProviderTester::configured(&server.uri(), API_KEY)
        .await
        .unwrap();
    (server, tester)
}

fn ok(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

// ── Configuration ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthenticated_request_is_client_error() {
    let server = MockServer::start().await;
    let tester = ProviderTester::configured(&server.uri(), "wrong").await.unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/tag/1"))
        .and(header("X-Api-Key", "wrong"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = tester
        .read("readarr_tag", json!({"id": 1, "label": "books"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::Client { .. }), "got {err:?}");
    let diagnostic = err.diagnostic();
    assert_eq!(diagnostic.summary, "Client Error");
    assert_error_contains(&[diagnostic], "Unable to read readarr_tag, got error: 401 Unauthorized");
}

#[tokio::test]
async fn test_configure_requires_url_and_key() {
    let tester = ProviderTester::new(readarr_provider::ReadarrProvider::new());
    let diagnostics = tester
        .provider()
        .configure(json!({"url": "", "api_key": ""}))
        .await
        .unwrap();

    // Explicit empty strings are reported even when the environment is set.
    assert_eq!(diagnostics.len(), 2);
    assert_error_contains(&diagnostics, "URL cannot be an empty string");
    assert_error_contains(&diagnostics, "API key cannot be an empty string");
}

// ── Tag lifecycle ───────────────────────────────────────────────────

#[tokio::test]
async fn test_tag_lifecycle() {
    let (server, tester) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/tag"))
        .and(header("X-Api-Key", API_KEY))
        .and(body_partial_json(json!({"label": "books"})))
        .respond_with(ok(json!({"id": 1, "label": "books"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tag/1"))
        .respond_with(ok(json!({"id": 1, "label": "books"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/tag/1"))
        .and(body_partial_json(json!({"id": 1, "label": "ebooks"})))
        .respond_with(ok(json!({"id": 1, "label": "ebooks"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/tag/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = json!({"label": "books"});
    let plan = tester.plan_create("readarr_tag", config.clone()).await.unwrap();
    assert_plan_creates(&plan);
    assert!(plan.planned_state["id"].is_null());

    let created = tester.create("readarr_tag", plan.planned_state).await.unwrap();
    assert_eq!(created, json!({"id": 1, "label": "books"}));

    let read = tester.read("readarr_tag", created.clone()).await.unwrap();
    assert_eq!(read, created);

    let unchanged = tester
        .plan_update("readarr_tag", read.clone(), config)
        .await
        .unwrap();
    assert_plan_no_changes(&unchanged);

    let plan = tester
        .plan_update("readarr_tag", read.clone(), json!({"label": "ebooks"}))
        .await
        .unwrap();
    assert_plan_changes_attribute(&plan, "label");
    assert_eq!(plan.changes.len(), 1);
    assert_eq!(plan.planned_state["id"], 1);

    let updated = tester
        .update("readarr_tag", read, plan.planned_state)
        .await
        .unwrap();
    assert_eq!(updated["label"], "ebooks");

    tester.delete("readarr_tag", updated).await.unwrap();
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_apply() {
    let (_server, tester) = setup().await;

    let err = tester
        .lifecycle_create("readarr_notification_webhook", json!({"name": "hook"}))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Missing required attribute"), "{err}");
}

#[tokio::test]
async fn test_whole_number_float_is_accepted_as_integer() {
    let (server, tester) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/releaseprofile"))
        .and(body_partial_json(json!({"indexerId": 1, "required": ["epub"]})))
        .respond_with(ok(json!({
            "id": 2, "enabled": true, "required": ["epub"], "ignored": [],
            "indexerId": 1, "tags": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = tester
        .lifecycle_create(
            "readarr_release_profile",
            json!({"enabled": true, "indexer_id": 1.0, "required": ["epub"]}),
        )
        .await
        .unwrap();
    assert_eq!(state["indexer_id"], 1);
}

// ── Partial updates ─────────────────────────────────────────────────

#[tokio::test]
async fn test_delay_profile_update_keeps_untouched_attributes() {
    let (server, tester) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/delayprofile/3"))
        .and(body_partial_json(json!({
            "id": 3,
            "enableUsenet": true,
            "enableTorrent": true,
            "preferredProtocol": "torrent",
            "usenetDelay": 60,
            "torrentDelay": 30,
            "order": 4
        })))
        .respond_with(ok(json!({
            "id": 3, "enableUsenet": true, "enableTorrent": true,
            "preferredProtocol": "torrent", "usenetDelay": 60, "torrentDelay": 30,
            "order": 4, "tags": [1]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = json!({
        "id": 3,
        "enable_usenet": true,
        "enable_torrent": true,
        "preferred_protocol": "torrent",
        "usenet_delay": 0,
        "torrent_delay": 30,
        "order": 4,
        "tags": [1]
    });
    let config = json!({"usenet_delay": 60, "tags": [1]});

    let plan = tester
        .plan_update("readarr_delay_profile", prior.clone(), config)
        .await
        .unwrap();
    assert_eq!(plan.changes.len(), 1);
    assert_plan_changes_attribute(&plan, "usenet_delay");
    assert_eq!(plan.planned_state["order"], 4);

    let state = tester
        .update("readarr_delay_profile", prior, plan.planned_state)
        .await
        .unwrap();
    assert_eq!(state["order"], 4);
    assert_eq!(state["torrent_delay"], 30);
}

#[tokio::test]
async fn test_download_client_rename_keeps_settings() {
    let (server, tester) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/downloadclient/4"))
        .and(body_partial_json(json!({
            "id": 4,
            "name": "renamed",
            "implementation": "QBittorrent",
            "enable": true,
            "priority": 7,
            "removeCompletedDownloads": true,
            "removeFailedDownloads": true
        })))
        .respond_with(ok(json!({
            "id": 4,
            "name": "renamed",
            "implementation": "QBittorrent",
            "configContract": "QBittorrentSettings",
            "protocol": "torrent",
            "enable": true,
            "priority": 7,
            "removeCompletedDownloads": true,
            "removeFailedDownloads": true,
            "tags": [],
            "fields": [
                {"name": "host", "value": "qbittorrent"},
                {"name": "port", "value": 8080},
                {"name": "useSsl", "value": false},
                {"name": "password", "value": "********"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prior = json!({
        "id": 4,
        "name": "qbit",
        "enable": true,
        "priority": 7,
        "remove_completed_downloads": true,
        "remove_failed_downloads": true,
        "tags": [],
        "host": "qbittorrent",
        "port": 8080,
        "use_ssl": false,
        "password": "hunter2"
    });
    let config = json!({"name": "renamed", "host": "qbittorrent", "port": 8080, "password": "hunter2"});

    let state = tester
        .lifecycle_update("readarr_download_client_qbittorrent", prior, config)
        .await
        .unwrap();

    assert_eq!(state["name"], "renamed");
    assert_eq!(state["enable"], true);
    assert_eq!(state["priority"], 7);
    assert_eq!(state["password"], "hunter2");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["name"] == "useSsl" && f["value"] == false));
}

// ── Implementation variants ─────────────────────────────────────────

#[tokio::test]
async fn test_qbittorrent_create_keeps_masked_password() {
    let (server, tester) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/downloadclient"))
        .and(body_partial_json(json!({
            "name": "qbit",
            "implementation": "QBittorrent",
            "configContract": "QBittorrentSettings",
            "protocol": "torrent"
        })))
        .respond_with(ok(json!({
            "id": 4,
            "name": "qbit",
            "implementation": "QBittorrent",
            "configContract": "QBittorrentSettings",
            "protocol": "torrent",
            "enable": true,
            "priority": 1,
            "tags": [],
            "fields": [
                {"name": "host", "value": "qbittorrent"},
                {"name": "port", "value": 8080},
                {"name": "useSsl", "value": false},
                {"name": "password", "value": "********"},
                {"name": "musicCategory", "value": "readarr"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = tester
        .lifecycle_create(
            "readarr_download_client_qbittorrent",
            json!({
                "name": "qbit",
                "enable": true,
                "host": "qbittorrent",
                "port": 8080,
                "password": "hunter2"
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], 4);
    assert_eq!(state["password"], "hunter2");
    assert_eq!(state["use_ssl"], false);
    assert_eq!(state["book_category"], "readarr");
    assert!(state["username"].is_null());
    assert!(state.get("implementation").is_none());
}

#[tokio::test]
async fn test_lazy_librarian_import_list_create() {
    let (server, tester) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/importlist"))
        .and(body_partial_json(json!({
            "name": "ll",
            "implementation": "LazyLibrarianImport",
            "configContract": "LazyLibrarianImportSettings",
            "listType": "program",
            "shouldMonitor": "entireAuthor",
            "rootFolderPath": "/config",
            "qualityProfileId": 1,
            "metadataProfileId": 1
        })))
        .respond_with(ok(json!({
            "id": 9,
            "name": "ll",
            "implementation": "LazyLibrarianImport",
            "configContract": "LazyLibrarianImportSettings",
            "listType": "program",
            "enableAutomaticAdd": false,
            "shouldMonitor": "entireAuthor",
            "shouldMonitorExisting": false,
            "shouldSearch": false,
            "monitorNewItems": "none",
            "rootFolderPath": "/config",
            "qualityProfileId": 1,
            "metadataProfileId": 1,
            "listOrder": 0,
            "tags": [],
            "fields": [
                {"name": "baseUrl", "value": "http://localhost:5299"},
                {"name": "apiKey", "value": "********"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = tester
        .lifecycle_create(
            "readarr_import_list_lazy_librarian",
            json!({
                "name": "ll",
                "enable_automatic_add": false,
                "should_monitor": "entireAuthor",
                "monitor_new_items": "none",
                "should_search": false,
                "root_folder_path": "/config",
                "quality_profile_id": 1,
                "metadata_profile_id": 1,
                "base_url": "http://localhost:5299",
                "api_key": "APIKey"
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], 9);
    assert_eq!(state["api_key"], "APIKey");
    assert_eq!(state["list_order"], 0);
}

#[tokio::test]
async fn test_quality_profile_create_sends_groups() {
    let (server, tester) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/qualityprofile"))
        .and(body_partial_json(json!({"name": "ebook", "upgradeAllowed": true, "cutoff": 1001})))
        .respond_with(ok(json!({
            "id": 2,
            "name": "ebook",
            "upgradeAllowed": true,
            "cutoff": 1001,
            "minFormatScore": 0,
            "cutoffFormatScore": 0,
            "items": [
                {"quality": {"id": 0, "name": "Unknown Text"}, "items": [], "allowed": false},
                {"id": 1001, "name": "Kindle", "allowed": true, "items": [
                    {"quality": {"id": 1, "name": "MOBI"}, "items": [], "allowed": true},
                    {"quality": {"id": 2, "name": "AZW3"}, "items": [], "allowed": true}
                ]}
            ],
            "formatItems": [{"format": 1, "name": "retail", "score": 0}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = tester
        .lifecycle_create(
            "readarr_quality_profile",
            json!({
                "name": "ebook",
                "upgrade_allowed": true,
                "cutoff": 1001,
                "quality_groups": [{
                    "id": 1001,
                    "name": "Kindle",
                    "qualities": [{"id": 1, "name": "MOBI"}, {"id": 2, "name": "AZW3"}]
                }]
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], 2);
    assert_eq!(state["quality_groups"].as_array().unwrap().len(), 1);
    assert_eq!(state["format_items"], json!([]));

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["items"][0]["id"], 1001);
    assert_eq!(body["items"][0]["items"][0]["quality"]["name"], "MOBI");
}

#[tokio::test]
async fn test_media_management_create_overwrites_singleton() {
    let (server, tester) = setup().await;

    let current = json!({
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
    });
    let mut wanted = current.clone();
    wanted["recycleBin"] = json!("/trash");
    wanted["fileDate"] = json!("bookReleaseDate");

    Mock::given(method("GET"))
        .and(path("/api/v1/config/mediamanagement"))
        .respond_with(ok(current))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/config/mediamanagement/1"))
        .and(body_partial_json(json!({"id": 1, "recycleBin": "/trash", "fileDate": "bookReleaseDate"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(wanted))
        .expect(1)
        .mount(&server)
        .await;

    let state = tester
        .lifecycle_create(
            "readarr_media_management",
            json!({
                "auto_unmonitor_previously_downloaded_books": false,
                "recycle_bin": "/trash",
                "recycle_bin_cleanup_days": 7,
                "download_propers_and_repacks": "preferAndUpgrade",
                "create_empty_author_folders": false,
                "delete_empty_folders": false,
                "file_date": "bookReleaseDate",
                "watch_library_for_changes": true,
                "rescan_after_refresh": "always",
                "allow_fingerprinting": "newFiles",
                "set_permissions_linux": false,
                "chmod_folder": "755",
                "chown_group": "",
                "skip_free_space_check_when_importing": false,
                "minimum_free_space_when_importing": 100,
                "copy_using_hardlinks": true,
                "import_extra_files": false,
                "extra_file_extensions": "srt"
            }),
        )
        .await
        .unwrap();

    assert_eq!(state["id"], 1);
    assert_eq!(state["recycle_bin"], "/trash");
}

// ── Import ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_import_remote_path_mapping() {
    let (server, tester) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/remotepathmapping/2"))
        .respond_with(ok(json!({
            "id": 2,
            "host": "sabnzbd",
            "remotePath": "/downloads/",
            "localPath": "/data/downloads/"
        })))
        .mount(&server)
        .await;

    let imported = tester
        .import("readarr_remote_path_mapping", "2")
        .await
        .unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].resource_type, "readarr_remote_path_mapping");
    assert_eq!(
        imported[0].state,
        json!({
            "id": 2,
            "host": "sabnzbd",
            "remote_path": "/downloads/",
            "local_path": "/data/downloads/"
        })
    );
}

#[tokio::test]
async fn test_import_rejects_non_numeric_id() {
    let (_server, tester) = setup().await;

    let err = tester.import("readarr_tag", "books").await.unwrap_err();
    assert_eq!(err.summary(), "Unexpected Import Identifier");
}

#[tokio::test]
async fn test_import_naming_is_singleton() {
    let (server, tester) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/config/naming"))
        .respond_with(ok(json!({
            "id": 1,
            "renameBooks": true,
            "replaceIllegalCharacters": true,
            "colonReplacementFormat": 0,
            "authorFolderFormat": "{Author Name}",
            "standardBookFormat": "{Book Title}/{Author Name} - {Book Title}"
        })))
        .mount(&server)
        .await;

    let imported = tester.import("readarr_naming", "whatever").await.unwrap();
    assert_eq!(imported[0].state["id"], 1);
    assert_eq!(imported[0].state["rename_books"], true);
}

// ── Data sources ────────────────────────────────────────────────────

#[tokio::test]
async fn test_data_source_not_found() {
    let (server, tester) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/downloadclient"))
        .respond_with(ok(json!([{
            "id": 1,
            "name": "transmission",
            "implementation": "Transmission",
            "configContract": "TransmissionSettings",
            "protocol": "torrent",
            "fields": []
        }])))
        .mount(&server)
        .await;

    let err = tester
        .read_data_source("readarr_download_client", json!({"name": "sabnzbd"}))
        .await
        .unwrap_err();

    assert_eq!(err.summary(), "Data Source Error");
    assert_eq!(
        err.to_string(),
        "Unable to find readarr_download_client, got error: data source not found: \
         no readarr_download_client with name 'sabnzbd'"
    );

    let found = tester
        .read_data_source("readarr_download_client", json!({"name": "transmission"}))
        .await
        .unwrap();
    assert_eq!(found["id"], 1);
    assert_eq!(found["config_contract"], "TransmissionSettings");
}

#[tokio::test]
async fn test_list_data_source() {
    let (server, tester) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/delayprofile"))
        .respond_with(ok(json!([
            {"id": 1, "enableUsenet": true, "enableTorrent": true, "preferredProtocol": "usenet",
             "usenetDelay": 0, "torrentDelay": 0, "order": 2147483647, "tags": []},
            {"id": 2, "enableUsenet": false, "enableTorrent": true, "preferredProtocol": "torrent",
             "usenetDelay": 0, "torrentDelay": 60, "order": 1, "tags": [3]}
        ])))
        .mount(&server)
        .await;

    let state = tester
        .read_data_source("readarr_delay_profiles", Value::Null)
        .await
        .unwrap();

    assert_eq!(state["id"], "2");
    assert_eq!(state["delay_profiles"][1]["torrent_delay"], 60);
    assert_eq!(state["delay_profiles"][1]["tags"], json!([3]));
}

#[tokio::test]
async fn test_list_error_uses_list_category() {
    let (server, tester) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/tag"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let err = tester
        .read_data_source("readarr_tags", Value::Null)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to list readarr_tags, got error: 500 Internal Server Error: boom"
    );
}
