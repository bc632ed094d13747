//! Download clients.
//!
//! [`DownloadClient`] is the union of every implementation's settings and
//! backs the generic `download_client` resource. The implementation models
//! carry only their own settings and convert through the generic one.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::fields::{FieldReader, FieldWriter};
use super::{variant_model, ResourceModel};
use crate::client::models::DownloadClientResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

const QBITTORRENT: (&str, &str, &str) = ("QBittorrent", "QBittorrentSettings", "torrent");
const TRANSMISSION: (&str, &str, &str) = ("Transmission", "TransmissionSettings", "torrent");
const USENET_DOWNLOAD_STATION: (&str, &str, &str) =
    ("UsenetDownloadStation", "DownloadStationSettings", "usenet");
const SABNZBD: (&str, &str, &str) = ("Sabnzbd", "SabnzbdSettings", "usenet");
const NZBGET: (&str, &str, &str) = ("Nzbget", "NzbgetSettings", "usenet");
const DELUGE: (&str, &str, &str) = ("Deluge", "DelugeSettings", "torrent");

/// Queue positions of torrent clients.
const TORRENT_PRIORITIES: (&[i64], &str) = (&[0, 1], "`0` Last, `1` First.");
const SABNZBD_PRIORITIES: (&[i64], &str) = (
    &[-100, -2, -1, 0, 1, 2],
    "`-100` Default, `-2` Paused, `-1` Low, `0` Normal, `1` High, `2` Force.",
);
const NZBGET_PRIORITIES: (&[i64], &str) = (
    &[-100, -50, 0, 50, 100, 900],
    "`-100` VeryLow, `-50` Low, `0` Normal, `50` High, `100` VeryHigh, `900` Force.",
);

/// Attributes every download client resource has.
fn base_schema(description: &str) -> Schema {
    Schema::v0()
        .with_description(description)
        .with_attribute(
            "enable",
            Attribute::optional_bool().with_description("Enable flag."),
        )
        .with_attribute(
            "remove_completed_downloads",
            Attribute::optional_bool().with_description("Remove completed downloads flag."),
        )
        .with_attribute(
            "remove_failed_downloads",
            Attribute::optional_bool().with_description("Remove failed downloads flag."),
        )
        .with_attribute(
            "priority",
            Attribute::optional_int64().with_description("Priority."),
        )
        .with_attribute(
            "name",
            Attribute::required_string().with_description("Download Client name."),
        )
        .with_attribute(
            "tags",
            Attribute::optional_int_set().with_description("List of associated tags."),
        )
        .with_attribute("id", Attribute::id().with_description("Download Client ID."))
}

/// Schema of an implementation setting.
fn field_attribute(name: &str) -> Attribute {
    match name {
        "add_paused" => Attribute::optional_bool().with_description("Add paused flag."),
        "add_stopped" => Attribute::optional_bool().with_description("Add stopped flag."),
        "use_ssl" => Attribute::optional_bool().with_description("Use SSL flag."),
        "start_on_add" => Attribute::optional_bool().with_description("Start on add flag."),
        "sequential_order" => {
            Attribute::optional_bool().with_description("Sequential order flag.")
        }
        "first_and_last" => Attribute::optional_bool().with_description("First and last flag."),
        "save_magnet_files" => {
            Attribute::optional_bool().with_description("Save magnet files flag.")
        }
        "read_only" => Attribute::optional_bool().with_description("Read only flag."),
        "port" => Attribute::optional_int64().with_description("Port."),
        "recent_book_priority" => {
            Attribute::optional_int64().with_description("Recent book priority.")
        }
        "older_book_priority" => {
            Attribute::optional_int64().with_description("Older book priority.")
        }
        "initial_state" => Attribute::optional_int64()
            .one_of_int(&[0, 1, 2])
            .with_description("Initial state. `0` Start, `1` ForceStart, `2` Pause."),
        "api_key" => Attribute::optional_string()
            .sensitive()
            .with_description("API key."),
        "password" => Attribute::optional_string()
            .sensitive()
            .with_description("Password."),
        "secret_token" => Attribute::optional_string()
            .sensitive()
            .with_description("Secret token."),
        "additional_tags" => {
            Attribute::optional_int_set().with_description("Additional tags, `0` TitleSlug, `1` Quality, `2` Language, `3` ReleaseGroup, `4` Year, `5` Indexer, `6` Network.")
        }
        "field_tags" => Attribute::optional_string_set().with_description("Field tags."),
        "post_import_tags" => {
            Attribute::optional_string_set().with_description("Post import tags.")
        }
        "host" => Attribute::optional_string().with_description("Host."),
        "url_base" => Attribute::optional_string().with_description("Base URL."),
        "username" => Attribute::optional_string().with_description("Username."),
        "book_category" => Attribute::optional_string().with_description("Book category."),
        "book_imported_category" => {
            Attribute::optional_string().with_description("Book imported category.")
        }
        "book_directory" => Attribute::optional_string().with_description("Book directory."),
        other => Attribute::optional_string().with_description(other.replace('_', " ")),
    }
}

fn with_fields(schema: Schema, names: &[&str]) -> Schema {
    names
        .iter()
        .fold(schema, |schema, name| schema.with_attribute(*name, field_attribute(name)))
}

/// Restrict the book priorities to what the implementation accepts.
fn with_priorities(schema: Schema, (values, legend): (&[i64], &str)) -> Schema {
    schema
        .with_attribute(
            "recent_book_priority",
            Attribute::optional_int64()
                .one_of_int(values)
                .with_description(format!("Recent book priority. {legend}")),
        )
        .with_attribute(
            "older_book_priority",
            Attribute::optional_int64()
                .one_of_int(values)
                .with_description(format!("Older book priority. {legend}")),
        )
}

/// Generic download client, holding the settings of every implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClient {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Implementation name.
    pub implementation: Option<String>,
    /// Settings contract of the implementation.
    pub config_contract: Option<String>,
    /// `usenet` or `torrent`.
    pub protocol: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Add downloads paused.
    pub add_paused: Option<bool>,
    /// Add downloads stopped.
    pub add_stopped: Option<bool>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Start downloads when added.
    pub start_on_add: Option<bool>,
    /// Download pieces in order.
    pub sequential_order: Option<bool>,
    /// Download first and last pieces first.
    pub first_and_last: Option<bool>,
    /// Save magnet links as files.
    pub save_magnet_files: Option<bool>,
    /// Do not move imported files.
    pub read_only: Option<bool>,
    /// Port.
    pub port: Option<i64>,
    /// Queue priority of recent books.
    pub recent_book_priority: Option<i64>,
    /// Queue priority of older books.
    pub older_book_priority: Option<i64>,
    /// State of added torrents.
    pub initial_state: Option<i64>,
    /// Host.
    pub host: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// RPC path.
    pub rpc_path: Option<String>,
    /// URL path prefix.
    pub url_base: Option<String>,
    /// Secret token.
    pub secret_token: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Category assigned to grabs.
    pub book_category: Option<String>,
    /// Category assigned after import.
    pub book_imported_category: Option<String>,
    /// Download directory.
    pub book_directory: Option<String>,
    /// Destination directory.
    pub destination: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Folder NZB files are written to.
    pub nzb_folder: Option<String>,
    /// Folder STRM files are written to.
    pub strm_folder: Option<String>,
    /// Folder torrent files are written to.
    pub torrent_folder: Option<String>,
    /// Extension of saved magnet files.
    pub magnet_file_extension: Option<String>,
    /// Folder finished downloads appear in.
    pub watch_folder: Option<String>,
    /// Extra tags added to downloads.
    pub additional_tags: Option<BTreeSet<i64>>,
    /// Client-side tags.
    pub field_tags: Option<BTreeSet<String>>,
    /// Tags added after import.
    pub post_import_tags: Option<BTreeSet<String>>,
}

impl DownloadClient {
    fn pinned(mut self, (implementation, config_contract, protocol): (&str, &str, &str)) -> Self {
        self.implementation = Some(implementation.to_string());
        self.config_contract = Some(config_contract.to_string());
        self.protocol = Some(protocol.to_string());
        self
    }
}

impl ResourceModel for DownloadClient {
    type Dto = DownloadClientResource;

    const NAME: &'static str = "download_client";

    fn schema() -> Schema {
        let schema = base_schema("Generic Download Client resource. When possible use a specific resource instead.")
            .with_attribute(
                "implementation",
                Attribute::required_string().with_description("Download Client implementation name."),
            )
            .with_attribute(
                "config_contract",
                Attribute::required_string().with_description("Download Client configuration template."),
            )
            .with_attribute(
                "protocol",
                Attribute::required_string()
                    .one_of_string(&["usenet", "torrent"])
                    .with_description("Protocol. Valid values are 'usenet' and 'torrent'."),
            );

        with_fields(
            schema,
            &[
                "add_paused",
                "add_stopped",
                "use_ssl",
                "start_on_add",
                "sequential_order",
                "first_and_last",
                "save_magnet_files",
                "read_only",
                "port",
                "recent_book_priority",
                "older_book_priority",
                "initial_state",
                "host",
                "api_key",
                "rpc_path",
                "url_base",
                "secret_token",
                "username",
                "password",
                "book_category",
                "book_imported_category",
                "book_directory",
                "destination",
                "category",
                "nzb_folder",
                "strm_folder",
                "torrent_folder",
                "magnet_file_extension",
                "watch_folder",
                "additional_tags",
                "field_tags",
                "post_import_tags",
            ],
        )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.download_clients()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> DownloadClientResource {
        DownloadClientResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            implementation: self.implementation.clone().unwrap_or_default(),
            config_contract: self.config_contract.clone().unwrap_or_default(),
            protocol: self.protocol.clone().unwrap_or_default(),
            enable: self.enable.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            remove_completed_downloads: self.remove_completed_downloads.unwrap_or_default(),
            remove_failed_downloads: self.remove_failed_downloads.unwrap_or_default(),
            tags: self.tags.iter().flatten().copied().collect(),
            fields: FieldWriter::new()
                .set("addPaused", &self.add_paused)
                .set("addStopped", &self.add_stopped)
                .set("useSsl", &self.use_ssl)
                .set("startOnAdd", &self.start_on_add)
                .set("sequentialOrder", &self.sequential_order)
                .set("firstAndLast", &self.first_and_last)
                .set("saveMagnetFiles", &self.save_magnet_files)
                .set("readOnly", &self.read_only)
                .set("port", &self.port)
                .set("recentTvPriority", &self.recent_book_priority)
                .set("olderTvPriority", &self.older_book_priority)
                .set("initialState", &self.initial_state)
                .set("host", &self.host)
                .set("apiKey", &self.api_key)
                .set("rpcPath", &self.rpc_path)
                .set("urlBase", &self.url_base)
                .set("secretToken", &self.secret_token)
                .set("username", &self.username)
                .set("password", &self.password)
                .set("musicCategory", &self.book_category)
                .set("musicImportedCategory", &self.book_imported_category)
                .set("tvDirectory", &self.book_directory)
                .set("destination", &self.destination)
                .set("category", &self.category)
                .set("nzbFolder", &self.nzb_folder)
                .set("strmFolder", &self.strm_folder)
                .set("torrentFolder", &self.torrent_folder)
                .set("magnetFileExtension", &self.magnet_file_extension)
                .set("watchFolder", &self.watch_folder)
                .set("additionalTags", &self.additional_tags)
                .set("tags", &self.field_tags)
                .set("postImportTags", &self.post_import_tags)
                .finish(),
        }
    }

    fn write_api(&mut self, dto: &DownloadClientResource) {
        let fields = FieldReader::new(&dto.fields);
        let api_key = self.api_key.take();
        let secret_token = self.secret_token.take();
        let password = self.password.take();

        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            implementation: Some(dto.implementation.clone()),
            config_contract: Some(dto.config_contract.clone()),
            protocol: Some(dto.protocol.clone()),
            enable: Some(dto.enable),
            priority: Some(dto.priority),
            remove_completed_downloads: Some(dto.remove_completed_downloads),
            remove_failed_downloads: Some(dto.remove_failed_downloads),
            tags: Some(dto.tags.iter().copied().collect()),
            add_paused: fields.get("addPaused"),
            add_stopped: fields.get("addStopped"),
            use_ssl: fields.get("useSsl"),
            start_on_add: fields.get("startOnAdd"),
            sequential_order: fields.get("sequentialOrder"),
            first_and_last: fields.get("firstAndLast"),
            save_magnet_files: fields.get("saveMagnetFiles"),
            read_only: fields.get("readOnly"),
            port: fields.get("port"),
            recent_book_priority: fields.get("recentTvPriority"),
            older_book_priority: fields.get("olderTvPriority"),
            initial_state: fields.get("initialState"),
            host: fields.get("host"),
            api_key: fields.sensitive("apiKey", api_key),
            rpc_path: fields.get("rpcPath"),
            url_base: fields.get("urlBase"),
            secret_token: fields.sensitive("secretToken", secret_token),
            username: fields.get("username"),
            password: fields.sensitive("password", password),
            book_category: fields.get("musicCategory"),
            book_imported_category: fields.get("musicImportedCategory"),
            book_directory: fields.get("tvDirectory"),
            destination: fields.get("destination"),
            category: fields.get("category"),
            nzb_folder: fields.get("nzbFolder"),
            strm_folder: fields.get("strmFolder"),
            torrent_folder: fields.get("torrentFolder"),
            magnet_file_extension: fields.get("magnetFileExtension"),
            watch_folder: fields.get("watchFolder"),
            additional_tags: fields.get("additionalTags"),
            field_tags: fields.get("tags"),
            post_import_tags: fields.get("postImportTags"),
        };
    }
}

/// qBittorrent download client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientQbittorrent {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Download pieces in order.
    pub sequential_order: Option<bool>,
    /// Download first and last pieces first.
    pub first_and_last: Option<bool>,
    /// Port.
    pub port: Option<i64>,
    /// Queue priority of recent books.
    pub recent_book_priority: Option<i64>,
    /// Queue priority of older books.
    pub older_book_priority: Option<i64>,
    /// State of added torrents.
    pub initial_state: Option<i64>,
    /// Host.
    pub host: Option<String>,
    /// URL path prefix.
    pub url_base: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Category assigned to grabs.
    pub book_category: Option<String>,
    /// Category assigned after import.
    pub book_imported_category: Option<String>,
}

impl DownloadClientQbittorrent {
    fn resource_schema() -> Schema {
        let schema = with_fields(
            base_schema("Download Client qBittorrent resource."),
            &[
                "use_ssl",
                "sequential_order",
                "first_and_last",
                "port",
                "recent_book_priority",
                "older_book_priority",
                "initial_state",
                "host",
                "url_base",
                "username",
                "password",
                "book_category",
                "book_imported_category",
            ],
        );
        with_priorities(schema, TORRENT_PRIORITIES)
    }
}

impl From<DownloadClientQbittorrent> for DownloadClient {
    fn from(c: DownloadClientQbittorrent) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            use_ssl: c.use_ssl,
            sequential_order: c.sequential_order,
            first_and_last: c.first_and_last,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            initial_state: c.initial_state,
            host: c.host,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            book_imported_category: c.book_imported_category,
            ..Default::default()
        }
        .pinned(QBITTORRENT)
    }
}

impl From<DownloadClient> for DownloadClientQbittorrent {
    fn from(c: DownloadClient) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            use_ssl: c.use_ssl,
            sequential_order: c.sequential_order,
            first_and_last: c.first_and_last,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            initial_state: c.initial_state,
            host: c.host,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            book_imported_category: c.book_imported_category,
        }
    }
}

variant_model!(
    DownloadClientQbittorrent,
    DownloadClient,
    "download_client_qbittorrent"
);

/// Transmission download client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientTransmission {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Add downloads paused.
    pub add_paused: Option<bool>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Port.
    pub port: Option<i64>,
    /// Queue priority of recent books.
    pub recent_book_priority: Option<i64>,
    /// Queue priority of older books.
    pub older_book_priority: Option<i64>,
    /// Host.
    pub host: Option<String>,
    /// URL path prefix.
    pub url_base: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Category assigned to grabs.
    pub book_category: Option<String>,
    /// Download directory.
    pub book_directory: Option<String>,
}

impl DownloadClientTransmission {
    fn resource_schema() -> Schema {
        let schema = with_fields(
            base_schema("Download Client Transmission resource."),
            &[
                "add_paused",
                "use_ssl",
                "port",
                "recent_book_priority",
                "older_book_priority",
                "host",
                "url_base",
                "username",
                "password",
                "book_category",
                "book_directory",
            ],
        );
        with_priorities(schema, TORRENT_PRIORITIES)
    }
}

impl From<DownloadClientTransmission> for DownloadClient {
    fn from(c: DownloadClientTransmission) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            add_paused: c.add_paused,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            book_directory: c.book_directory,
            ..Default::default()
        }
        .pinned(TRANSMISSION)
    }
}

impl From<DownloadClient> for DownloadClientTransmission {
    fn from(c: DownloadClient) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            add_paused: c.add_paused,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            book_directory: c.book_directory,
        }
    }
}

variant_model!(
    DownloadClientTransmission,
    DownloadClient,
    "download_client_transmission"
);

/// Usenet Download Station download client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientUsenetDownloadStation {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Port.
    pub port: Option<i64>,
    /// Host.
    pub host: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Category assigned to grabs.
    pub book_category: Option<String>,
    /// Download directory.
    pub book_directory: Option<String>,
}

impl DownloadClientUsenetDownloadStation {
    fn resource_schema() -> Schema {
        with_fields(
            base_schema("Download Client Usenet Download Station resource."),
            &[
                "use_ssl",
                "port",
                "host",
                "username",
                "password",
                "book_category",
                "book_directory",
            ],
        )
    }
}

impl From<DownloadClientUsenetDownloadStation> for DownloadClient {
    fn from(c: DownloadClientUsenetDownloadStation) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            use_ssl: c.use_ssl,
            port: c.port,
            host: c.host,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            book_directory: c.book_directory,
            ..Default::default()
        }
        .pinned(USENET_DOWNLOAD_STATION)
    }
}

impl From<DownloadClient> for DownloadClientUsenetDownloadStation {
    fn from(c: DownloadClient) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            use_ssl: c.use_ssl,
            port: c.port,
            host: c.host,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            book_directory: c.book_directory,
        }
    }
}

variant_model!(
    DownloadClientUsenetDownloadStation,
    DownloadClient,
    "download_client_usenet_download_station"
);

/// SABnzbd download client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientSabnzbd {
    /// Download Client ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Client priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Tags restricting which authors use the client.
    pub tags: Option<BTreeSet<i64>>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Web UI port.
    pub port: Option<i64>,
    /// Queue priority of recent books.
    pub recent_book_priority: Option<i64>,
    /// Queue priority of older books.
    pub older_book_priority: Option<i64>,
    /// Web UI host.
    pub host: Option<String>,
    /// SABnzbd API key.
    pub api_key: Option<String>,
    /// Web UI path prefix.
    pub url_base: Option<String>,
    /// Web UI user.
    pub username: Option<String>,
    /// Web UI password.
    pub password: Option<String>,
    /// Category assigned to grabs.
    pub book_category: Option<String>,
}

impl DownloadClientSabnzbd {
    fn resource_schema() -> Schema {
        let schema = with_fields(
            base_schema("Download Client SABnzbd resource."),
            &[
                "use_ssl",
                "port",
                "host",
                "api_key",
                "url_base",
                "username",
                "password",
                "book_category",
            ],
        );
        with_priorities(schema, SABNZBD_PRIORITIES)
    }
}

impl From<DownloadClientSabnzbd> for DownloadClient {
    fn from(c: DownloadClientSabnzbd) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            api_key: c.api_key,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            ..Default::default()
        }
        .pinned(SABNZBD)
    }
}

impl From<DownloadClient> for DownloadClientSabnzbd {
    fn from(c: DownloadClient) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            api_key: c.api_key,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
        }
    }
}

variant_model!(DownloadClientSabnzbd, DownloadClient, "download_client_sabnzbd");

/// NZBGet download client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientNzbget {
    /// Download Client ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Client priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Tags restricting which authors use the client.
    pub tags: Option<BTreeSet<i64>>,
    /// Queue grabs paused.
    pub add_paused: Option<bool>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// RPC port.
    pub port: Option<i64>,
    /// Queue priority of recent books.
    pub recent_book_priority: Option<i64>,
    /// Queue priority of older books.
    pub older_book_priority: Option<i64>,
    /// RPC host.
    pub host: Option<String>,
    /// RPC path prefix.
    pub url_base: Option<String>,
    /// RPC user.
    pub username: Option<String>,
    /// RPC password.
    pub password: Option<String>,
    /// Category assigned to grabs.
    pub book_category: Option<String>,
}

impl DownloadClientNzbget {
    fn resource_schema() -> Schema {
        let schema = with_fields(
            base_schema("Download Client NZBGet resource."),
            &[
                "add_paused",
                "use_ssl",
                "port",
                "host",
                "url_base",
                "username",
                "password",
                "book_category",
            ],
        );
        with_priorities(schema, NZBGET_PRIORITIES)
    }
}

impl From<DownloadClientNzbget> for DownloadClient {
    fn from(c: DownloadClientNzbget) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            add_paused: c.add_paused,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
            ..Default::default()
        }
        .pinned(NZBGET)
    }
}

impl From<DownloadClient> for DownloadClientNzbget {
    fn from(c: DownloadClient) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            add_paused: c.add_paused,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            url_base: c.url_base,
            username: c.username,
            password: c.password,
            book_category: c.book_category,
        }
    }
}

variant_model!(DownloadClientNzbget, DownloadClient, "download_client_nzbget");

/// Deluge download client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadClientDeluge {
    /// Download Client ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Send releases to this client.
    pub enable: Option<bool>,
    /// Client priority, lower is preferred.
    pub priority: Option<i64>,
    /// Remove imported downloads from the client.
    pub remove_completed_downloads: Option<bool>,
    /// Remove failed downloads from the client.
    pub remove_failed_downloads: Option<bool>,
    /// Tags restricting which authors use the client.
    pub tags: Option<BTreeSet<i64>>,
    /// Add torrents paused.
    pub add_paused: Option<bool>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Web UI port.
    pub port: Option<i64>,
    /// Queue position of recent books.
    pub recent_book_priority: Option<i64>,
    /// Queue position of older books.
    pub older_book_priority: Option<i64>,
    /// Web UI host.
    pub host: Option<String>,
    /// Web UI path prefix.
    pub url_base: Option<String>,
    /// Web UI password.
    pub password: Option<String>,
    /// Label assigned to grabs.
    pub book_category: Option<String>,
    /// Label assigned after import.
    pub book_imported_category: Option<String>,
}

impl DownloadClientDeluge {
    fn resource_schema() -> Schema {
        let schema = with_fields(
            base_schema("Download Client Deluge resource."),
            &[
                "add_paused",
                "use_ssl",
                "port",
                "host",
                "url_base",
                "password",
                "book_category",
                "book_imported_category",
            ],
        );
        with_priorities(schema, TORRENT_PRIORITIES)
    }
}

impl From<DownloadClientDeluge> for DownloadClient {
    fn from(c: DownloadClientDeluge) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            add_paused: c.add_paused,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            url_base: c.url_base,
            password: c.password,
            book_category: c.book_category,
            book_imported_category: c.book_imported_category,
            ..Default::default()
        }
        .pinned(DELUGE)
    }
}

impl From<DownloadClient> for DownloadClientDeluge {
    fn from(c: DownloadClient) -> Self {
        Self {
            id: c.id,
            name: c.name,
            enable: c.enable,
            priority: c.priority,
            remove_completed_downloads: c.remove_completed_downloads,
            remove_failed_downloads: c.remove_failed_downloads,
            tags: c.tags,
            add_paused: c.add_paused,
            use_ssl: c.use_ssl,
            port: c.port,
            recent_book_priority: c.recent_book_priority,
            older_book_priority: c.older_book_priority,
            host: c.host,
            url_base: c.url_base,
            password: c.password,
            book_category: c.book_category,
            book_imported_category: c.book_imported_category,
        }
    }
}

variant_model!(DownloadClientDeluge, DownloadClient, "download_client_deluge");

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
        assert_schema_matches_model::<DownloadClient>();
        assert_schema_matches_model::<DownloadClientQbittorrent>();
        assert_schema_matches_model::<DownloadClientTransmission>();
        assert_schema_matches_model::<DownloadClientUsenetDownloadStation>();
        assert_schema_matches_model::<DownloadClientSabnzbd>();
        assert_schema_matches_model::<DownloadClientNzbget>();
        assert_schema_matches_model::<DownloadClientDeluge>();
    }

    #[test]
    fn test_qbittorrent_to_api() {
        let client = DownloadClientQbittorrent {
            name: Some("qBittorrent".to_string()),
            enable: Some(true),
            priority: Some(1),
            tags: Some(BTreeSet::from([2, 1])),
            host: Some("qbittorrent".to_string()),
            port: Some(9091),
            first_and_last: Some(true),
            book_category: Some("books".to_string()),
            ..Default::default()
        };

        let dto = client.to_api();
        assert_eq!(dto.implementation, "QBittorrent");
        assert_eq!(dto.config_contract, "QBittorrentSettings");
        assert_eq!(dto.protocol, "torrent");
        assert_eq!(dto.tags, vec![1, 2]);
        assert_eq!(dto.fields.len(), 4);
        assert!(dto.fields.contains(&Field::new("musicCategory", json!("books"))));
        assert!(dto.fields.contains(&Field::new("port", json!(9091))));

        let body = serde_json::to_value(&dto).unwrap();
        assert!(body.get("id").is_none());
    }

    #[test]
    fn test_qbittorrent_write_keeps_masked_password() {
        let mut client = DownloadClientQbittorrent {
            id: Some(4),
            name: Some("qBittorrent".to_string()),
            password: Some("hunter2".to_string()),
            username: Some("admin".to_string()),
            ..Default::default()
        };
        let dto = DownloadClientResource {
            id: 4,
            name: "qBittorrent".to_string(),
            implementation: "QBittorrent".to_string(),
            config_contract: "QBittorrentSettings".to_string(),
            protocol: "torrent".to_string(),
            enable: true,
            fields: vec![
                Field::new("host", json!("localhost")),
                Field::new("password", json!(SENSITIVE_MASK)),
                Field::new("initialState", json!(2)),
            ],
            ..Default::default()
        };

        client.write_api(&dto);
        assert_eq!(client.password.as_deref(), Some("hunter2"));
        assert_eq!(client.host.as_deref(), Some("localhost"));
        assert_eq!(client.initial_state, Some(2));
        assert_eq!(client.enable, Some(true));
        assert_eq!(client.tags, Some(BTreeSet::new()));
        // Settings missing from the response are cleared.
        assert_eq!(client.username, None);
    }

    #[test]
    fn test_transmission_round_trip_through_generic() {
        let client = DownloadClientTransmission {
            name: Some("Transmission".to_string()),
            add_paused: Some(true),
            book_directory: Some("/books".to_string()),
            ..Default::default()
        };

        let generic = DownloadClient::from(client.clone());
        assert_eq!(generic.implementation.as_deref(), Some("Transmission"));
        assert_eq!(generic.protocol.as_deref(), Some("torrent"));

        let back = DownloadClientTransmission::from(generic);
        assert_eq!(back, client);
    }

    #[test]
    fn test_generic_schema_validators() {
        let schema = DownloadClient::schema();
        assert!(!schema.attribute("protocol").unwrap().validators.is_empty());
        assert!(schema.attribute("secret_token").unwrap().flags.sensitive);
        assert!(schema.attribute("api_key").unwrap().flags.sensitive);
        assert!(
            !DownloadClientQbittorrent::schema()
                .attribute("initial_state")
                .unwrap()
                .validators
                .is_empty()
        );
        assert!(schema
            .attribute("recent_book_priority")
            .unwrap()
            .validators
            .is_empty());
    }

    #[test]
    fn test_priorities_follow_implementation() {
        let config = |priority: i64| {
            json!({"name": "dl", "host": "localhost", "recent_book_priority": priority})
        };

        assert!(validate(&DownloadClientSabnzbd::schema(), &config(-100)).is_empty());
        assert!(validate(&DownloadClientNzbget::schema(), &config(900)).is_empty());
        assert!(validate(&DownloadClientDeluge::schema(), &config(1)).is_empty());

        let diagnostics = validate(&DownloadClientDeluge::schema(), &config(-100));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].attribute.as_deref(), Some("recent_book_priority"));
        assert_eq!(validate(&DownloadClientNzbget::schema(), &config(2)).len(), 1);
    }

    #[test]
    fn test_sabnzbd_to_api() {
        let dto = DownloadClientSabnzbd {
            name: Some("SABnzbd".to_string()),
            host: Some("sabnzbd".to_string()),
            api_key: Some("key".to_string()),
            recent_book_priority: Some(-100),
            book_category: Some("books".to_string()),
            ..Default::default()
        }
        .to_api();
        assert_eq!(dto.implementation, "Sabnzbd");
        assert_eq!(dto.config_contract, "SabnzbdSettings");
        assert_eq!(dto.protocol, "usenet");
        assert!(dto.fields.contains(&Field::new("apiKey", json!("key"))));
        assert!(dto.fields.contains(&Field::new("recentTvPriority", json!(-100))));
    }

    #[test]
    fn test_deluge_keeps_masked_password() {
        let mut client = DownloadClientDeluge {
            id: Some(5),
            password: Some("deluge".to_string()),
            ..Default::default()
        };
        let dto = DownloadClientResource {
            id: 5,
            name: "Deluge".to_string(),
            implementation: "Deluge".to_string(),
            protocol: "torrent".to_string(),
            fields: vec![
                Field::new("host", json!("deluge")),
                Field::new("port", json!(8112)),
                Field::new("password", json!(SENSITIVE_MASK)),
                Field::new("musicImportedCategory", json!("imported")),
            ],
            ..Default::default()
        };

        client.write_api(&dto);
        assert_eq!(client.password.as_deref(), Some("deluge"));
        assert_eq!(client.port, Some(8112));
        assert_eq!(client.book_imported_category.as_deref(), Some("imported"));
    }

    #[test]
    fn test_usenet_download_station_pins_protocol() {
        let dto = DownloadClientUsenetDownloadStation {
            name: Some("ds".to_string()),
            ..Default::default()
        }
        .to_api();
        assert_eq!(dto.implementation, "UsenetDownloadStation");
        assert_eq!(dto.config_contract, "DownloadStationSettings");
        assert_eq!(dto.protocol, "usenet");
    }
}
