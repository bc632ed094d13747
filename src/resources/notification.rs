//! Notifications (connections).
//!
//! Event subscriptions are top-level DTO booleans; implementation settings
//! travel in `fields` like the other provider-backed objects.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::fields::{FieldReader, FieldWriter};
use super::{variant_model, ResourceModel};
use crate::client::models::NotificationResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

const WEBHOOK: (&str, &str) = ("Webhook", "WebhookSettings");
const CUSTOM_SCRIPT: (&str, &str) = ("CustomScript", "CustomScriptSettings");
const GOTIFY: (&str, &str) = ("Gotify", "GotifySettings");
const TELEGRAM: (&str, &str) = ("Telegram", "TelegramSettings");

const GOTIFY_PRIORITIES: &[i64] = &[0, 2, 5, 8];

/// Event flags shared by every notification type.
const EVENTS: &[(&str, &str)] = &[
    ("on_grab", "On grab flag."),
    ("on_release_import", "On release import flag."),
    ("on_upgrade", "On upgrade flag."),
    ("on_rename", "On rename flag."),
    ("on_author_delete", "On author deleted flag."),
    ("on_book_delete", "On book delete flag."),
    ("on_book_file_delete", "On book file delete flag."),
    (
        "on_book_file_delete_for_upgrade",
        "On book file delete for upgrade flag.",
    ),
    ("on_health_issue", "On health issue flag."),
    ("on_book_retag", "On book retag flag."),
    ("on_application_update", "On application update flag."),
    ("include_health_warnings", "Include health warnings."),
];

fn base_schema(description: &str) -> Schema {
    let schema = Schema::v0()
        .with_description(description)
        .with_attribute(
            "name",
            Attribute::required_string().with_description("Notification name."),
        )
        .with_attribute(
            "tags",
            Attribute::optional_int_set().with_description("List of associated tags."),
        )
        .with_attribute("id", Attribute::id().with_description("Notification ID."));

    EVENTS.iter().fold(schema, |schema, (name, description)| {
        schema.with_attribute(*name, Attribute::optional_bool().with_description(*description))
    })
}

/// Generic notification: every event flag plus the common settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Implementation name.
    pub implementation: Option<String>,
    /// Settings contract of the implementation.
    pub config_contract: Option<String>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Notify on grab.
    pub on_grab: Option<bool>,
    /// Notify on release import.
    pub on_release_import: Option<bool>,
    /// Notify on upgrade.
    pub on_upgrade: Option<bool>,
    /// Notify on rename.
    pub on_rename: Option<bool>,
    /// Notify on author delete.
    pub on_author_delete: Option<bool>,
    /// Notify on book delete.
    pub on_book_delete: Option<bool>,
    /// Notify on book file delete.
    pub on_book_file_delete: Option<bool>,
    /// Notify on book file delete for upgrade.
    pub on_book_file_delete_for_upgrade: Option<bool>,
    /// Notify on health issue.
    pub on_health_issue: Option<bool>,
    /// Notify on download failure.
    pub on_download_failure: Option<bool>,
    /// Notify on import failure.
    pub on_import_failure: Option<bool>,
    /// Notify on book retag.
    pub on_book_retag: Option<bool>,
    /// Notify on application update.
    pub on_application_update: Option<bool>,
    /// Include health warnings in health notifications.
    pub include_health_warnings: Option<bool>,
    /// Connect over HTTPS.
    pub use_ssl: Option<bool>,
    /// Port.
    pub port: Option<i64>,
    /// HTTP method, `1` POST or `2` PUT.
    pub method: Option<i64>,
    /// Script arguments.
    pub arguments: Option<String>,
    /// Script path.
    pub path: Option<String>,
    /// Target URL.
    pub url: Option<String>,
    /// Host.
    pub host: Option<String>,
    /// URL path prefix.
    pub url_base: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Token.
    pub token: Option<String>,
    /// Chat ID.
    pub chat_id: Option<String>,
    /// Channel.
    pub channel: Option<String>,
    /// Client-side tags.
    pub field_tags: Option<BTreeSet<String>>,
    /// Server URL.
    pub server: Option<String>,
    /// Application token.
    pub app_token: Option<String>,
    /// Gotify message priority.
    pub priority: Option<i64>,
    /// Bot token.
    pub bot_token: Option<String>,
    /// Send without sound.
    pub send_silently: Option<bool>,
}

impl Notification {
    fn pinned(mut self, (implementation, config_contract): (&str, &str)) -> Self {
        self.implementation = Some(implementation.to_string());
        self.config_contract = Some(config_contract.to_string());
        self
    }
}

impl ResourceModel for Notification {
    type Dto = NotificationResource;

    const NAME: &'static str = "notification";

    fn schema() -> Schema {
        base_schema("Generic Notification resource. When possible use a specific resource instead.")
            .with_attribute(
                "implementation",
                Attribute::required_string().with_description("Notification implementation name."),
            )
            .with_attribute(
                "config_contract",
                Attribute::required_string().with_description("Notification configuration template."),
            )
            .with_attribute(
                "on_download_failure",
                Attribute::optional_bool().with_description("On download failure flag."),
            )
            .with_attribute(
                "on_import_failure",
                Attribute::optional_bool().with_description("On import failure flag."),
            )
            .with_attribute("use_ssl", Attribute::optional_bool().with_description("Use SSL flag."))
            .with_attribute("port", Attribute::optional_int64().with_description("Port."))
            .with_attribute(
                "method",
                Attribute::optional_int64()
                    .one_of_int(&[1, 2])
                    .with_description("Method. `1` POST, `2` PUT."),
            )
            .with_attribute("arguments", Attribute::optional_string().with_description("Arguments."))
            .with_attribute("path", Attribute::optional_string().with_description("Path."))
            .with_attribute("url", Attribute::optional_string().with_description("URL."))
            .with_attribute("host", Attribute::optional_string().with_description("Host."))
            .with_attribute("url_base", Attribute::optional_string().with_description("Base URL."))
            .with_attribute("username", Attribute::optional_string().with_description("Username."))
            .with_attribute(
                "password",
                Attribute::optional_string().sensitive().with_description("Password."),
            )
            .with_attribute(
                "api_key",
                Attribute::optional_string().sensitive().with_description("API key."),
            )
            .with_attribute(
                "token",
                Attribute::optional_string().sensitive().with_description("Token."),
            )
            .with_attribute("chat_id", Attribute::optional_string().with_description("Chat ID."))
            .with_attribute("channel", Attribute::optional_string().with_description("Channel."))
            .with_attribute(
                "field_tags",
                Attribute::optional_string_set().with_description("Tags and emojis."),
            )
            .with_attribute("server", Attribute::optional_string().with_description("Server."))
            .with_attribute(
                "app_token",
                Attribute::optional_string().sensitive().with_description("App token."),
            )
            .with_attribute("priority", Attribute::optional_int64().with_description("Priority."))
            .with_attribute(
                "bot_token",
                Attribute::optional_string().sensitive().with_description("Bot token."),
            )
            .with_attribute(
                "send_silently",
                Attribute::optional_bool().with_description("Send silently flag."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.notifications()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> NotificationResource {
        NotificationResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            implementation: self.implementation.clone().unwrap_or_default(),
            config_contract: self.config_contract.clone().unwrap_or_default(),
            on_grab: self.on_grab.unwrap_or_default(),
            on_release_import: self.on_release_import.unwrap_or_default(),
            on_upgrade: self.on_upgrade.unwrap_or_default(),
            on_rename: self.on_rename.unwrap_or_default(),
            on_author_delete: self.on_author_delete.unwrap_or_default(),
            on_book_delete: self.on_book_delete.unwrap_or_default(),
            on_book_file_delete: self.on_book_file_delete.unwrap_or_default(),
            on_book_file_delete_for_upgrade: self
                .on_book_file_delete_for_upgrade
                .unwrap_or_default(),
            on_health_issue: self.on_health_issue.unwrap_or_default(),
            on_download_failure: self.on_download_failure.unwrap_or_default(),
            on_import_failure: self.on_import_failure.unwrap_or_default(),
            on_book_retag: self.on_book_retag.unwrap_or_default(),
            on_application_update: self.on_application_update.unwrap_or_default(),
            include_health_warnings: self.include_health_warnings.unwrap_or_default(),
            tags: self.tags.iter().flatten().copied().collect(),
            fields: FieldWriter::new()
                .set("useSsl", &self.use_ssl)
                .set("port", &self.port)
                .set("method", &self.method)
                .set("arguments", &self.arguments)
                .set("path", &self.path)
                .set("url", &self.url)
                .set("host", &self.host)
                .set("urlBase", &self.url_base)
                .set("username", &self.username)
                .set("password", &self.password)
                .set("apiKey", &self.api_key)
                .set("token", &self.token)
                .set("chatId", &self.chat_id)
                .set("channel", &self.channel)
                .set("tags", &self.field_tags)
                .set("server", &self.server)
                .set("appToken", &self.app_token)
                .set("priority", &self.priority)
                .set("botToken", &self.bot_token)
                .set("sendSilently", &self.send_silently)
                .finish(),
        }
    }

    fn write_api(&mut self, dto: &NotificationResource) {
        let fields = FieldReader::new(&dto.fields);
        let password = self.password.take();
        let api_key = self.api_key.take();
        let token = self.token.take();
        let app_token = self.app_token.take();
        let bot_token = self.bot_token.take();

        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            implementation: Some(dto.implementation.clone()),
            config_contract: Some(dto.config_contract.clone()),
            tags: Some(dto.tags.iter().copied().collect()),
            on_grab: Some(dto.on_grab),
            on_release_import: Some(dto.on_release_import),
            on_upgrade: Some(dto.on_upgrade),
            on_rename: Some(dto.on_rename),
            on_author_delete: Some(dto.on_author_delete),
            on_book_delete: Some(dto.on_book_delete),
            on_book_file_delete: Some(dto.on_book_file_delete),
            on_book_file_delete_for_upgrade: Some(dto.on_book_file_delete_for_upgrade),
            on_health_issue: Some(dto.on_health_issue),
            on_download_failure: Some(dto.on_download_failure),
            on_import_failure: Some(dto.on_import_failure),
            on_book_retag: Some(dto.on_book_retag),
            on_application_update: Some(dto.on_application_update),
            include_health_warnings: Some(dto.include_health_warnings),
            use_ssl: fields.get("useSsl"),
            port: fields.get("port"),
            method: fields.get("method"),
            arguments: fields.get("arguments"),
            path: fields.get("path"),
            url: fields.get("url"),
            host: fields.get("host"),
            url_base: fields.get("urlBase"),
            username: fields.get("username"),
            password: fields.sensitive("password", password),
            api_key: fields.sensitive("apiKey", api_key),
            token: fields.sensitive("token", token),
            chat_id: fields.get("chatId"),
            channel: fields.get("channel"),
            field_tags: fields.get("tags"),
            server: fields.get("server"),
            app_token: fields.sensitive("appToken", app_token),
            priority: fields.get("priority"),
            bot_token: fields.sensitive("botToken", bot_token),
            send_silently: fields.get("sendSilently"),
        };
    }
}

/// Webhook notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationWebhook {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Notify on grab.
    pub on_grab: Option<bool>,
    /// Notify on release import.
    pub on_release_import: Option<bool>,
    /// Notify on upgrade.
    pub on_upgrade: Option<bool>,
    /// Notify on rename.
    pub on_rename: Option<bool>,
    /// Notify on author delete.
    pub on_author_delete: Option<bool>,
    /// Notify on book delete.
    pub on_book_delete: Option<bool>,
    /// Notify on book file delete.
    pub on_book_file_delete: Option<bool>,
    /// Notify on book file delete for upgrade.
    pub on_book_file_delete_for_upgrade: Option<bool>,
    /// Notify on health issue.
    pub on_health_issue: Option<bool>,
    /// Notify on book retag.
    pub on_book_retag: Option<bool>,
    /// Notify on application update.
    pub on_application_update: Option<bool>,
    /// Include health warnings in health notifications.
    pub include_health_warnings: Option<bool>,
    /// Target URL.
    pub url: Option<String>,
    /// HTTP method, `1` POST or `2` PUT.
    pub method: Option<i64>,
    /// Username.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

impl NotificationWebhook {
    fn resource_schema() -> Schema {
        base_schema("Notification Webhook resource.")
            .with_attribute("url", Attribute::required_string().with_description("URL."))
            .with_attribute(
                "method",
                Attribute::required_int64()
                    .one_of_int(&[1, 2])
                    .with_description("Method. `1` POST, `2` PUT."),
            )
            .with_attribute("username", Attribute::optional_string().with_description("Username."))
            .with_attribute(
                "password",
                Attribute::optional_string().sensitive().with_description("Password."),
            )
    }
}

impl From<NotificationWebhook> for Notification {
    fn from(n: NotificationWebhook) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            url: n.url,
            method: n.method,
            username: n.username,
            password: n.password,
            ..Default::default()
        }
        .pinned(WEBHOOK)
    }
}

impl From<Notification> for NotificationWebhook {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            url: n.url,
            method: n.method,
            username: n.username,
            password: n.password,
        }
    }
}

variant_model!(NotificationWebhook, Notification, "notification_webhook");

/// Custom script notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationCustomScript {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Notify on grab.
    pub on_grab: Option<bool>,
    /// Notify on release import.
    pub on_release_import: Option<bool>,
    /// Notify on upgrade.
    pub on_upgrade: Option<bool>,
    /// Notify on rename.
    pub on_rename: Option<bool>,
    /// Notify on author delete.
    pub on_author_delete: Option<bool>,
    /// Notify on book delete.
    pub on_book_delete: Option<bool>,
    /// Notify on book file delete.
    pub on_book_file_delete: Option<bool>,
    /// Notify on book file delete for upgrade.
    pub on_book_file_delete_for_upgrade: Option<bool>,
    /// Notify on health issue.
    pub on_health_issue: Option<bool>,
    /// Notify on book retag.
    pub on_book_retag: Option<bool>,
    /// Notify on application update.
    pub on_application_update: Option<bool>,
    /// Include health warnings in health notifications.
    pub include_health_warnings: Option<bool>,
    /// Script path.
    pub path: Option<String>,
    /// Script arguments.
    pub arguments: Option<String>,
}

impl NotificationCustomScript {
    fn resource_schema() -> Schema {
        base_schema("Notification Custom Script resource.")
            .with_attribute("path", Attribute::required_string().with_description("Path."))
            .with_attribute("arguments", Attribute::optional_string().with_description("Arguments."))
    }
}

impl From<NotificationCustomScript> for Notification {
    fn from(n: NotificationCustomScript) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            path: n.path,
            arguments: n.arguments,
            ..Default::default()
        }
        .pinned(CUSTOM_SCRIPT)
    }
}

impl From<Notification> for NotificationCustomScript {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            path: n.path,
            arguments: n.arguments,
        }
    }
}

variant_model!(
    NotificationCustomScript,
    Notification,
    "notification_custom_script"
);

/// Gotify notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationGotify {
    /// Notification ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Tags restricting which authors notify.
    pub tags: Option<BTreeSet<i64>>,
    /// Notify on grab.
    pub on_grab: Option<bool>,
    /// Notify on release import.
    pub on_release_import: Option<bool>,
    /// Notify on upgrade.
    pub on_upgrade: Option<bool>,
    /// Notify on rename.
    pub on_rename: Option<bool>,
    /// Notify on author delete.
    pub on_author_delete: Option<bool>,
    /// Notify on book delete.
    pub on_book_delete: Option<bool>,
    /// Notify on book file delete.
    pub on_book_file_delete: Option<bool>,
    /// Notify on book file delete for upgrade.
    pub on_book_file_delete_for_upgrade: Option<bool>,
    /// Notify on health issue.
    pub on_health_issue: Option<bool>,
    /// Notify on book retag.
    pub on_book_retag: Option<bool>,
    /// Notify on application update.
    pub on_application_update: Option<bool>,
    /// Include health warnings in health notifications.
    pub include_health_warnings: Option<bool>,
    /// Gotify server URL.
    pub server: Option<String>,
    /// Application token.
    pub app_token: Option<String>,
    /// Message priority.
    pub priority: Option<i64>,
}

impl NotificationGotify {
    fn resource_schema() -> Schema {
        base_schema("Notification Gotify resource.")
            .with_attribute("server", Attribute::required_string().with_description("Server."))
            .with_attribute(
                "app_token",
                Attribute::required_string().sensitive().with_description("App token."),
            )
            .with_attribute(
                "priority",
                Attribute::optional_int64()
                    .one_of_int(GOTIFY_PRIORITIES)
                    .with_description("Priority. `0` Min, `2` Low, `5` Normal, `8` High."),
            )
    }
}

impl From<NotificationGotify> for Notification {
    fn from(n: NotificationGotify) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            server: n.server,
            app_token: n.app_token,
            priority: n.priority,
            ..Default::default()
        }
        .pinned(GOTIFY)
    }
}

impl From<Notification> for NotificationGotify {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            server: n.server,
            app_token: n.app_token,
            priority: n.priority,
        }
    }
}

variant_model!(NotificationGotify, Notification, "notification_gotify");

/// Telegram notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationTelegram {
    /// Notification ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Tags restricting which authors notify.
    pub tags: Option<BTreeSet<i64>>,
    /// Notify on grab.
    pub on_grab: Option<bool>,
    /// Notify on release import.
    pub on_release_import: Option<bool>,
    /// Notify on upgrade.
    pub on_upgrade: Option<bool>,
    /// Notify on rename.
    pub on_rename: Option<bool>,
    /// Notify on author delete.
    pub on_author_delete: Option<bool>,
    /// Notify on book delete.
    pub on_book_delete: Option<bool>,
    /// Notify on book file delete.
    pub on_book_file_delete: Option<bool>,
    /// Notify on book file delete for upgrade.
    pub on_book_file_delete_for_upgrade: Option<bool>,
    /// Notify on health issue.
    pub on_health_issue: Option<bool>,
    /// Notify on book retag.
    pub on_book_retag: Option<bool>,
    /// Notify on application update.
    pub on_application_update: Option<bool>,
    /// Include health warnings in health notifications.
    pub include_health_warnings: Option<bool>,
    /// Bot token.
    pub bot_token: Option<String>,
    /// Target chat.
    pub chat_id: Option<String>,
    /// Send without sound.
    pub send_silently: Option<bool>,
}

impl NotificationTelegram {
    fn resource_schema() -> Schema {
        base_schema("Notification Telegram resource.")
            .with_attribute(
                "bot_token",
                Attribute::required_string().sensitive().with_description("Bot token."),
            )
            .with_attribute("chat_id", Attribute::required_string().with_description("Chat ID."))
            .with_attribute(
                "send_silently",
                Attribute::optional_bool().with_description("Send silently flag."),
            )
    }
}

impl From<NotificationTelegram> for Notification {
    fn from(n: NotificationTelegram) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            bot_token: n.bot_token,
            chat_id: n.chat_id,
            send_silently: n.send_silently,
            ..Default::default()
        }
        .pinned(TELEGRAM)
    }
}

impl From<Notification> for NotificationTelegram {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            name: n.name,
            tags: n.tags,
            on_grab: n.on_grab,
            on_release_import: n.on_release_import,
            on_upgrade: n.on_upgrade,
            on_rename: n.on_rename,
            on_author_delete: n.on_author_delete,
            on_book_delete: n.on_book_delete,
            on_book_file_delete: n.on_book_file_delete,
            on_book_file_delete_for_upgrade: n.on_book_file_delete_for_upgrade,
            on_health_issue: n.on_health_issue,
            on_book_retag: n.on_book_retag,
            on_application_update: n.on_application_update,
            include_health_warnings: n.include_health_warnings,
            bot_token: n.bot_token,
            chat_id: n.chat_id,
            send_silently: n.send_silently,
        }
    }
}

variant_model!(NotificationTelegram, Notification, "notification_telegram");
