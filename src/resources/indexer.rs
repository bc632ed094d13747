//! Indexers.
//!
//! Same layout as the download clients: a generic union model plus
//! implementation models that convert through it. Torrent indexers keep
//! their seed criteria in `seedCriteria.*` fields.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::fields::{FieldReader, FieldWriter};
use super::{variant_model, ResourceModel};
use crate::client::models::IndexerResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

const NEWZNAB: (&str, &str, &str) = ("Newznab", "NewznabSettings", "usenet");
const TORZNAB: (&str, &str, &str) = ("Torznab", "TorznabSettings", "torrent");
const IPTORRENTS: (&str, &str, &str) = ("IPTorrents", "IPTorrentsSettings", "torrent");
const FILELIST: (&str, &str, &str) = ("FileList", "FileListSettings", "torrent");
const TORRENT_RSS: (&str, &str, &str) =
    ("TorrentRssIndexer", "TorrentRssIndexerSettings", "torrent");

fn base_schema(description: &str) -> Schema {
    Schema::v0()
        .with_description(description)
        .with_attribute(
            "enable_rss",
            Attribute::optional_bool().with_description("Enable RSS flag."),
        )
        .with_attribute(
            "priority",
            Attribute::optional_int64().with_description("Priority."),
        )
        .with_attribute(
            "name",
            Attribute::required_string().with_description("Indexer name."),
        )
        .with_attribute(
            "tags",
            Attribute::optional_int_set().with_description("List of associated tags."),
        )
        .with_attribute("id", Attribute::id().with_description("Indexer ID."))
}

fn with_search(schema: Schema) -> Schema {
    schema
        .with_attribute(
            "enable_automatic_search",
            Attribute::optional_bool().with_description("Enable automatic search flag."),
        )
        .with_attribute(
            "enable_interactive_search",
            Attribute::optional_bool().with_description("Enable interactive search flag."),
        )
}

fn field_attribute(name: &str) -> Attribute {
    match name {
        "allow_zero_size" => Attribute::optional_bool().with_description("Allow zero size files."),
        "ranked_only" => Attribute::optional_bool().with_description("Allow ranked only."),
        "delay" => Attribute::optional_int64().with_description("Delay before grabbing."),
        "minimum_seeders" => Attribute::optional_int64().with_description("Minimum seeders."),
        "early_release_limit" => {
            Attribute::optional_int64().with_description("Early release limit.")
        }
        "seed_time" => Attribute::optional_int64().with_description("Seed time."),
        "author_seed_time" => Attribute::optional_int64().with_description("Author seed time."),
        "seed_ratio" => Attribute::optional_float64().with_description("Seed ratio."),
        "categories" => Attribute::optional_int_set().with_description("Categories list."),
        "api_key" => Attribute::optional_string()
            .sensitive()
            .with_description("API key."),
        "passkey" => Attribute::optional_string()
            .sensitive()
            .with_description("Passkey."),
        "password" => Attribute::optional_string()
            .sensitive()
            .with_description("Password."),
        "cookie" => Attribute::optional_string()
            .sensitive()
            .with_description("Cookie."),
        "captcha_token" => Attribute::optional_string().with_description("Captcha token."),
        "additional_parameters" => {
            Attribute::optional_string().with_description("Additional parameters.")
        }
        "api_path" => Attribute::optional_string().with_description("API path."),
        "api_user" => Attribute::optional_string().with_description("API user."),
        "base_url" => Attribute::optional_string().with_description("Base URL."),
        "username" => Attribute::optional_string().with_description("Username."),
        other => Attribute::optional_string().with_description(other.replace('_', " ")),
    }
}

fn with_fields(schema: Schema, names: &[&str]) -> Schema {
    names
        .iter()
        .fold(schema, |schema, name| schema.with_attribute(*name, field_attribute(name)))
}

/// Generic indexer, holding the settings of every implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indexer {
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
    /// Use for RSS sync.
    pub enable_rss: Option<bool>,
    /// Use for automatic searches.
    pub enable_automatic_search: Option<bool>,
    /// Use for interactive searches.
    pub enable_interactive_search: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Accept releases without a size.
    pub allow_zero_size: Option<bool>,
    /// Only ranked releases.
    pub ranked_only: Option<bool>,
    /// Minutes before grabbing.
    pub delay: Option<i64>,
    /// Minimum seeders of a release.
    pub minimum_seeders: Option<i64>,
    /// Days before release a grab is still accepted.
    pub early_release_limit: Option<i64>,
    /// Minutes to seed.
    pub seed_time: Option<i64>,
    /// Minutes to seed full-author releases.
    pub author_seed_time: Option<i64>,
    /// Ratio to seed to.
    pub seed_ratio: Option<f64>,
    /// Extra query string parameters.
    pub additional_parameters: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// API path.
    pub api_path: Option<String>,
    /// API user.
    pub api_user: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Captcha token.
    pub captcha_token: Option<String>,
    /// Session cookie.
    pub cookie: Option<String>,
    /// Passkey.
    pub passkey: Option<String>,
    /// Password.
    pub password: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Categories to search.
    pub categories: Option<BTreeSet<i64>>,
}

impl Indexer {
    fn pinned(mut self, (implementation, config_contract, protocol): (&str, &str, &str)) -> Self {
        self.implementation = Some(implementation.to_string());
        self.config_contract = Some(config_contract.to_string());
        self.protocol = Some(protocol.to_string());
        self
    }
}

impl ResourceModel for Indexer {
    type Dto = IndexerResource;

    const NAME: &'static str = "indexer";

    fn schema() -> Schema {
        let schema = with_search(base_schema(
            "Generic Indexer resource. When possible use a specific resource instead.",
        ))
        .with_attribute(
            "implementation",
            Attribute::required_string().with_description("Indexer implementation name."),
        )
        .with_attribute(
            "config_contract",
            Attribute::required_string().with_description("Indexer configuration template."),
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
                "allow_zero_size",
                "ranked_only",
                "delay",
                "minimum_seeders",
                "early_release_limit",
                "seed_time",
                "author_seed_time",
                "seed_ratio",
                "additional_parameters",
                "api_key",
                "api_path",
                "api_user",
                "base_url",
                "captcha_token",
                "cookie",
                "passkey",
                "password",
                "username",
                "categories",
            ],
        )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.indexers()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> IndexerResource {
        IndexerResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            implementation: self.implementation.clone().unwrap_or_default(),
            config_contract: self.config_contract.clone().unwrap_or_default(),
            protocol: self.protocol.clone().unwrap_or_default(),
            enable_rss: self.enable_rss.unwrap_or_default(),
            enable_automatic_search: self.enable_automatic_search.unwrap_or_default(),
            enable_interactive_search: self.enable_interactive_search.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            tags: self.tags.iter().flatten().copied().collect(),
            fields: FieldWriter::new()
                .set("allowZeroSize", &self.allow_zero_size)
                .set("rankedOnly", &self.ranked_only)
                .set("delay", &self.delay)
                .set("minimumSeeders", &self.minimum_seeders)
                .set("earlyReleaseLimit", &self.early_release_limit)
                .set("seedCriteria.seedTime", &self.seed_time)
                .set("seedCriteria.discographySeedTime", &self.author_seed_time)
                .set("seedCriteria.seedRatio", &self.seed_ratio)
                .set("additionalParameters", &self.additional_parameters)
                .set("apiKey", &self.api_key)
                .set("apiPath", &self.api_path)
                .set("apiUser", &self.api_user)
                .set("baseUrl", &self.base_url)
                .set("captchaToken", &self.captcha_token)
                .set("cookie", &self.cookie)
                .set("passkey", &self.passkey)
                .set("password", &self.password)
                .set("username", &self.username)
                .set("categories", &self.categories)
                .finish(),
        }
    }

    fn write_api(&mut self, dto: &IndexerResource) {
        let fields = FieldReader::new(&dto.fields);
        let api_key = self.api_key.take();
        let cookie = self.cookie.take();
        let passkey = self.passkey.take();
        let password = self.password.take();

        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            implementation: Some(dto.implementation.clone()),
            config_contract: Some(dto.config_contract.clone()),
            protocol: Some(dto.protocol.clone()),
            enable_rss: Some(dto.enable_rss),
            enable_automatic_search: Some(dto.enable_automatic_search),
            enable_interactive_search: Some(dto.enable_interactive_search),
            priority: Some(dto.priority),
            tags: Some(dto.tags.iter().copied().collect()),
            allow_zero_size: fields.get("allowZeroSize"),
            ranked_only: fields.get("rankedOnly"),
            delay: fields.get("delay"),
            minimum_seeders: fields.get("minimumSeeders"),
            early_release_limit: fields.get("earlyReleaseLimit"),
            seed_time: fields.get("seedCriteria.seedTime"),
            author_seed_time: fields.get("seedCriteria.discographySeedTime"),
            seed_ratio: fields.get("seedCriteria.seedRatio"),
            additional_parameters: fields.get("additionalParameters"),
            api_key: fields.sensitive("apiKey", api_key),
            api_path: fields.get("apiPath"),
            api_user: fields.get("apiUser"),
            base_url: fields.get("baseUrl"),
            captcha_token: fields.get("captchaToken"),
            cookie: fields.sensitive("cookie", cookie),
            passkey: fields.sensitive("passkey", passkey),
            password: fields.sensitive("password", password),
            username: fields.get("username"),
            categories: fields.get("categories"),
        };
    }
}

/// Newznab usenet indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerNewznab {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Use for RSS sync.
    pub enable_rss: Option<bool>,
    /// Use for automatic searches.
    pub enable_automatic_search: Option<bool>,
    /// Use for interactive searches.
    pub enable_interactive_search: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Days before release a grab is still accepted.
    pub early_release_limit: Option<i64>,
    /// Extra query string parameters.
    pub additional_parameters: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// API path.
    pub api_path: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Categories to search.
    pub categories: Option<BTreeSet<i64>>,
}

impl IndexerNewznab {
    fn resource_schema() -> Schema {
        with_fields(
            with_search(base_schema("Indexer Newznab resource.")),
            &[
                "early_release_limit",
                "additional_parameters",
                "api_key",
                "api_path",
                "base_url",
                "categories",
            ],
        )
    }
}

impl From<IndexerNewznab> for Indexer {
    fn from(i: IndexerNewznab) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            enable_automatic_search: i.enable_automatic_search,
            enable_interactive_search: i.enable_interactive_search,
            priority: i.priority,
            tags: i.tags,
            early_release_limit: i.early_release_limit,
            additional_parameters: i.additional_parameters,
            api_key: i.api_key,
            api_path: i.api_path,
            base_url: i.base_url,
            categories: i.categories,
            ..Default::default()
        }
        .pinned(NEWZNAB)
    }
}

impl From<Indexer> for IndexerNewznab {
    fn from(i: Indexer) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            enable_automatic_search: i.enable_automatic_search,
            enable_interactive_search: i.enable_interactive_search,
            priority: i.priority,
            tags: i.tags,
            early_release_limit: i.early_release_limit,
            additional_parameters: i.additional_parameters,
            api_key: i.api_key,
            api_path: i.api_path,
            base_url: i.base_url,
            categories: i.categories,
        }
    }
}

variant_model!(IndexerNewznab, Indexer, "indexer_newznab");

/// Torznab torrent indexer, e.g. Jackett or Prowlarr.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerTorznab {
    /// Indexer ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Use the indexer for RSS sync.
    pub enable_rss: Option<bool>,
    /// Use the indexer for automatic searches.
    pub enable_automatic_search: Option<bool>,
    /// Use the indexer for interactive searches.
    pub enable_interactive_search: Option<bool>,
    /// Indexer priority, lower is preferred.
    pub priority: Option<i64>,
    /// Tags restricting which authors use the indexer.
    pub tags: Option<BTreeSet<i64>>,
    /// Minimum seeders of a release.
    pub minimum_seeders: Option<i64>,
    /// Days before release a grab is still accepted.
    pub early_release_limit: Option<i64>,
    /// Minutes to seed.
    pub seed_time: Option<i64>,
    /// Minutes to seed full-author releases.
    pub author_seed_time: Option<i64>,
    /// Ratio to seed to.
    pub seed_ratio: Option<f64>,
    /// Extra query string parameters.
    pub additional_parameters: Option<String>,
    /// Indexer API key.
    pub api_key: Option<String>,
    /// API path, usually `/api`.
    pub api_path: Option<String>,
    /// Indexer URL.
    pub base_url: Option<String>,
    /// Newznab categories to search.
    pub categories: Option<BTreeSet<i64>>,
}

impl IndexerTorznab {
    fn resource_schema() -> Schema {
        with_fields(
            with_search(base_schema("Indexer Torznab resource.")),
            &[
                "minimum_seeders",
                "early_release_limit",
                "seed_time",
                "author_seed_time",
                "seed_ratio",
                "additional_parameters",
                "api_key",
                "api_path",
                "base_url",
                "categories",
            ],
        )
    }
}

impl From<IndexerTorznab> for Indexer {
    fn from(i: IndexerTorznab) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            enable_automatic_search: i.enable_automatic_search,
            enable_interactive_search: i.enable_interactive_search,
            priority: i.priority,
            tags: i.tags,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            additional_parameters: i.additional_parameters,
            api_key: i.api_key,
            api_path: i.api_path,
            base_url: i.base_url,
            categories: i.categories,
            ..Default::default()
        }
        .pinned(TORZNAB)
    }
}

impl From<Indexer> for IndexerTorznab {
    fn from(i: Indexer) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            enable_automatic_search: i.enable_automatic_search,
            enable_interactive_search: i.enable_interactive_search,
            priority: i.priority,
            tags: i.tags,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            additional_parameters: i.additional_parameters,
            api_key: i.api_key,
            api_path: i.api_path,
            base_url: i.base_url,
            categories: i.categories,
        }
    }
}

variant_model!(IndexerTorznab, Indexer, "indexer_torznab");

/// IPTorrents RSS indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerIptorrents {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Use for RSS sync.
    pub enable_rss: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Minimum seeders of a release.
    pub minimum_seeders: Option<i64>,
    /// Days before release a grab is still accepted.
    pub early_release_limit: Option<i64>,
    /// Minutes to seed.
    pub seed_time: Option<i64>,
    /// Minutes to seed full-author releases.
    pub author_seed_time: Option<i64>,
    /// Ratio to seed to.
    pub seed_ratio: Option<f64>,
    /// Base URL.
    pub base_url: Option<String>,
}

impl IndexerIptorrents {
    fn resource_schema() -> Schema {
        with_fields(
            base_schema("Indexer IPTorrents resource."),
            &[
                "minimum_seeders",
                "early_release_limit",
                "seed_time",
                "author_seed_time",
                "seed_ratio",
            ],
        )
        .with_attribute(
            "base_url",
            Attribute::required_string().with_description("Base URL."),
        )
    }
}

impl From<IndexerIptorrents> for Indexer {
    fn from(i: IndexerIptorrents) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            priority: i.priority,
            tags: i.tags,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            base_url: i.base_url,
            ..Default::default()
        }
        .pinned(IPTORRENTS)
    }
}

impl From<Indexer> for IndexerIptorrents {
    fn from(i: Indexer) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            priority: i.priority,
            tags: i.tags,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            base_url: i.base_url,
        }
    }
}

variant_model!(IndexerIptorrents, Indexer, "indexer_iptorrents");

/// FileList torrent indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerFilelist {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Use for RSS sync.
    pub enable_rss: Option<bool>,
    /// Use for automatic searches.
    pub enable_automatic_search: Option<bool>,
    /// Use for interactive searches.
    pub enable_interactive_search: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Minimum seeders of a release.
    pub minimum_seeders: Option<i64>,
    /// Days before release a grab is still accepted.
    pub early_release_limit: Option<i64>,
    /// Minutes to seed.
    pub seed_time: Option<i64>,
    /// Minutes to seed full-author releases.
    pub author_seed_time: Option<i64>,
    /// Ratio to seed to.
    pub seed_ratio: Option<f64>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Passkey.
    pub passkey: Option<String>,
    /// Username.
    pub username: Option<String>,
    /// Categories to search.
    pub categories: Option<BTreeSet<i64>>,
}

impl IndexerFilelist {
    fn resource_schema() -> Schema {
        with_fields(
            with_search(base_schema("Indexer FileList resource.")),
            &[
                "minimum_seeders",
                "early_release_limit",
                "seed_time",
                "author_seed_time",
                "seed_ratio",
                "base_url",
                "categories",
            ],
        )
        .with_attribute(
            "passkey",
            Attribute::required_string()
                .sensitive()
                .with_description("Passkey."),
        )
        .with_attribute(
            "username",
            Attribute::required_string().with_description("Username."),
        )
    }
}

impl From<IndexerFilelist> for Indexer {
    fn from(i: IndexerFilelist) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            enable_automatic_search: i.enable_automatic_search,
            enable_interactive_search: i.enable_interactive_search,
            priority: i.priority,
            tags: i.tags,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            base_url: i.base_url,
            passkey: i.passkey,
            username: i.username,
            categories: i.categories,
            ..Default::default()
        }
        .pinned(FILELIST)
    }
}

impl From<Indexer> for IndexerFilelist {
    fn from(i: Indexer) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            enable_automatic_search: i.enable_automatic_search,
            enable_interactive_search: i.enable_interactive_search,
            priority: i.priority,
            tags: i.tags,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            base_url: i.base_url,
            passkey: i.passkey,
            username: i.username,
            categories: i.categories,
        }
    }
}

variant_model!(IndexerFilelist, Indexer, "indexer_filelist");

/// Generic torrent RSS feed indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexerTorrentRss {
    /// Object ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Use for RSS sync.
    pub enable_rss: Option<bool>,
    /// Priority, lower is preferred.
    pub priority: Option<i64>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Accept releases without a size.
    pub allow_zero_size: Option<bool>,
    /// Minimum seeders of a release.
    pub minimum_seeders: Option<i64>,
    /// Days before release a grab is still accepted.
    pub early_release_limit: Option<i64>,
    /// Minutes to seed.
    pub seed_time: Option<i64>,
    /// Minutes to seed full-author releases.
    pub author_seed_time: Option<i64>,
    /// Ratio to seed to.
    pub seed_ratio: Option<f64>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Session cookie.
    pub cookie: Option<String>,
}

impl IndexerTorrentRss {
    fn resource_schema() -> Schema {
        with_fields(
            base_schema("Indexer Torrent RSS resource."),
            &[
                "allow_zero_size",
                "minimum_seeders",
                "early_release_limit",
                "seed_time",
                "author_seed_time",
                "seed_ratio",
                "cookie",
            ],
        )
        .with_attribute(
            "base_url",
            Attribute::required_string().with_description("Base URL."),
        )
    }
}

impl From<IndexerTorrentRss> for Indexer {
    fn from(i: IndexerTorrentRss) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            priority: i.priority,
            tags: i.tags,
            allow_zero_size: i.allow_zero_size,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            base_url: i.base_url,
            cookie: i.cookie,
            ..Default::default()
        }
        .pinned(TORRENT_RSS)
    }
}

impl From<Indexer> for IndexerTorrentRss {
    fn from(i: Indexer) -> Self {
        Self {
            id: i.id,
            name: i.name,
            enable_rss: i.enable_rss,
            priority: i.priority,
            tags: i.tags,
            allow_zero_size: i.allow_zero_size,
            minimum_seeders: i.minimum_seeders,
            early_release_limit: i.early_release_limit,
            seed_time: i.seed_time,
            author_seed_time: i.author_seed_time,
            seed_ratio: i.seed_ratio,
            base_url: i.base_url,
            cookie: i.cookie,
        }
    }
}

variant_model!(IndexerTorrentRss, Indexer, "indexer_torrent_rss");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Field;
    use crate::resources::fields::SENSITIVE_MASK;
    use crate::resources::tests::assert_schema_matches_model;
    use serde_json::json;

    #[test]
    fn test_schemas_match_models() {
        assert_schema_matches_model::<Indexer>();
        assert_schema_matches_model::<IndexerNewznab>();
        assert_schema_matches_model::<IndexerIptorrents>();
        assert_schema_matches_model::<IndexerFilelist>();
        assert_schema_matches_model::<IndexerTorrentRss>();
        assert_schema_matches_model::<IndexerTorznab>();
    }

    #[test]
    fn test_torznab_to_api() {
        let indexer = IndexerTorznab {
            name: Some("Jackett".to_string()),
            base_url: Some("http://jackett:9117/api/v2.0/indexers/all/results/torznab".to_string()),
            api_path: Some("/api".to_string()),
            minimum_seeders: Some(1),
            seed_ratio: Some(1.5),
            categories: Some(BTreeSet::from([7020, 3030])),
            ..Default::default()
        };

        let dto = indexer.to_api();
        assert_eq!(dto.implementation, "Torznab");
        assert_eq!(dto.config_contract, "TorznabSettings");
        assert_eq!(dto.protocol, "torrent");
        assert!(dto.fields.contains(&Field::new("minimumSeeders", json!(1))));
        assert!(dto.fields.contains(&Field::new("categories", json!([3030, 7020]))));
        assert!(dto
            .fields
            .contains(&Field::new("seedCriteria.seedRatio", json!(1.5))));
    }

    #[test]
    fn test_seed_criteria_fields() {
        let indexer = IndexerIptorrents {
            name: Some("IPTorrents".to_string()),
            enable_rss: Some(true),
            base_url: Some("https://iptorrents.com/rss?u=1;tp=abc".to_string()),
            seed_ratio: Some(0.5),
            seed_time: Some(60),
            author_seed_time: Some(120),
            ..Default::default()
        };

        let dto = indexer.to_api();
        assert_eq!(dto.implementation, "IPTorrents");
        assert_eq!(dto.protocol, "torrent");
        assert!(!dto.enable_automatic_search);
        assert!(dto
            .fields
            .contains(&Field::new("seedCriteria.seedRatio", json!(0.5))));
        assert!(dto
            .fields
            .contains(&Field::new("seedCriteria.discographySeedTime", json!(120))));

        let mut read_back = IndexerIptorrents::default();
        read_back.write_api(&dto);
        assert_eq!(read_back.seed_ratio, Some(0.5));
        assert_eq!(read_back.author_seed_time, Some(120));
        assert_eq!(read_back.base_url, indexer.base_url);
    }

    #[test]
    fn test_newznab_categories() {
        let dto = IndexerResource {
            id: 1,
            name: "Test".to_string(),
            implementation: "Newznab".to_string(),
            config_contract: "NewznabSettings".to_string(),
            protocol: "usenet".to_string(),
            enable_rss: true,
            fields: vec![
                Field::new("baseUrl", json!("https://lolo.sickbeard.com")),
                Field::new("apiPath", json!("/api")),
                Field::new("categories", json!([7020, 8010])),
            ],
            ..Default::default()
        };

        let mut indexer = IndexerNewznab::default();
        indexer.write_api(&dto);
        assert_eq!(indexer.api_path.as_deref(), Some("/api"));
        assert_eq!(indexer.categories, Some(BTreeSet::from([7020, 8010])));
        assert_eq!(indexer.api_key, None);
    }

    #[test]
    fn test_filelist_keeps_masked_passkey() {
        let mut indexer = IndexerFilelist {
            passkey: Some("secret".to_string()),
            username: Some("user".to_string()),
            ..Default::default()
        };
        let dto = IndexerResource {
            id: 2,
            fields: vec![
                Field::new("passkey", json!(SENSITIVE_MASK)),
                Field::new("username", json!("user")),
            ],
            ..Default::default()
        };

        indexer.write_api(&dto);
        assert_eq!(indexer.passkey.as_deref(), Some("secret"));
        assert_eq!(indexer.id, Some(2));

        let schema = IndexerFilelist::schema();
        let passkey = schema.attribute("passkey").unwrap();
        assert!(passkey.flags.required && passkey.flags.sensitive);
    }
}
