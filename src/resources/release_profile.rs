//! Release profiles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::ResourceModel;
use crate::client::models::ReleaseProfileResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

/// Required and ignored release terms, optionally limited to one indexer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseProfile {
    /// Object ID.
    pub id: Option<i64>,
    /// Apply the profile.
    pub enabled: Option<bool>,
    /// Restrict to one indexer, `0` for all.
    pub indexer_id: Option<i64>,
    /// Terms a release must contain.
    pub required: Option<BTreeSet<String>>,
    /// Terms that reject a release.
    pub ignored: Option<BTreeSet<String>>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
}

impl ResourceModel for ReleaseProfile {
    type Dto = ReleaseProfileResource;

    const NAME: &'static str = "release_profile";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Release Profile resource.")
            .with_attribute("id", Attribute::id().with_description("Release Profile ID."))
            .with_attribute("enabled", Attribute::optional_bool().with_description("Enabled."))
            .with_attribute(
                "indexer_id",
                Attribute::optional_int64()
                    .with_default(json!(0))
                    .with_description("Indexer ID. Default to all."),
            )
            .with_attribute(
                "required",
                Attribute::optional_string_set()
                    .with_default(json!([]))
                    .with_description(
                        "Required terms. At least one of `required` and `ignored` must be set.",
                    ),
            )
            .with_attribute(
                "ignored",
                Attribute::optional_string_set()
                    .with_default(json!([]))
                    .with_description(
                        "Ignored terms. At least one of `required` and `ignored` must be set.",
                    ),
            )
            .with_attribute(
                "tags",
                Attribute::optional_int_set().with_description("List of associated tags."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.release_profiles()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> ReleaseProfileResource {
        ReleaseProfileResource {
            id: self.id.unwrap_or_default(),
            enabled: self.enabled.unwrap_or_default(),
            required: self.required.iter().flatten().cloned().collect(),
            ignored: self.ignored.iter().flatten().cloned().collect(),
            indexer_id: self.indexer_id.unwrap_or_default(),
            tags: self.tags.iter().flatten().copied().collect(),
        }
    }

    fn write_api(&mut self, dto: &ReleaseProfileResource) {
        *self = Self {
            id: Some(dto.id),
            enabled: Some(dto.enabled),
            indexer_id: Some(dto.indexer_id),
            required: Some(dto.required.iter().cloned().collect()),
            ignored: Some(dto.ignored.iter().cloned().collect()),
            tags: Some(dto.tags.iter().copied().collect()),
        };
    }
}
