//! Quality profiles.
//!
//! Readarr stores a profile as an ordered list of every quality, each either
//! standalone or inside a named group, with an `allowed` flag. State only
//! keeps the allowed entries as `quality_groups`: a group with one quality is
//! sent as a standalone item.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ResourceModel;
use crate::client::models::{
    ProfileFormatItem, Quality, QualityProfileItem, QualityProfileResource,
};
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};

/// Which qualities a release may have and when to stop upgrading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityProfile {
    /// Quality Profile ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Keep upgrading until the cutoff.
    pub upgrade_allowed: Option<bool>,
    /// Quality or group id at which upgrades stop.
    pub cutoff: Option<i64>,
    /// Custom format score at which upgrades stop.
    pub cutoff_format_score: Option<i64>,
    /// Minimum custom format score.
    pub min_format_score: Option<i64>,
    /// Allowed qualities, grouped.
    pub quality_groups: Option<Vec<QualityGroup>>,
    /// Custom format scores.
    pub format_items: Option<Vec<FormatItem>>,
}

/// Allowed qualities sharing a rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityGroup {
    /// Group id, or the quality id for a single quality.
    pub id: Option<i64>,
    /// Group name, or the quality name for a single quality.
    pub name: Option<String>,
    /// Members.
    pub qualities: Option<Vec<QualityRef>>,
}

/// A quality by id and name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityRef {
    /// Quality id.
    pub id: Option<i64>,
    /// Quality name.
    pub name: Option<String>,
}

/// Score of one custom format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatItem {
    /// Custom format id.
    pub format: Option<i64>,
    /// Custom format name.
    pub name: Option<String>,
    /// Score.
    pub score: Option<i64>,
}

impl QualityRef {
    fn to_api(&self) -> Quality {
        Quality {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
        }
    }
}

impl From<&Quality> for QualityRef {
    fn from(quality: &Quality) -> Self {
        Self {
            id: Some(quality.id),
            name: Some(quality.name.clone()),
        }
    }
}

impl QualityGroup {
    fn to_api(&self) -> QualityProfileItem {
        let qualities = self.qualities.as_deref().unwrap_or_default();
        if let [single] = qualities {
            return QualityProfileItem {
                quality: Some(single.to_api()),
                allowed: true,
                ..Default::default()
            };
        }

        QualityProfileItem {
            id: self.id,
            name: self.name.clone(),
            quality: None,
            items: qualities
                .iter()
                .map(|q| QualityProfileItem {
                    quality: Some(q.to_api()),
                    allowed: true,
                    ..Default::default()
                })
                .collect(),
            allowed: true,
        }
    }

    fn from_api(item: &QualityProfileItem) -> Self {
        match &item.quality {
            Some(quality) => Self {
                id: Some(quality.id),
                name: Some(quality.name.clone()),
                qualities: Some(vec![QualityRef::from(quality)]),
            },
            None => Self {
                id: item.id,
                name: item.name.clone(),
                qualities: Some(
                    item.items
                        .iter()
                        .filter_map(|i| i.quality.as_ref())
                        .map(QualityRef::from)
                        .collect(),
                ),
            },
        }
    }
}

fn quality_type() -> AttributeType {
    AttributeType::object(BTreeMap::from([
        ("id".to_string(), AttributeType::Int64),
        ("name".to_string(), AttributeType::String),
    ]))
}

fn group_type() -> AttributeType {
    AttributeType::object(BTreeMap::from([
        ("id".to_string(), AttributeType::Int64),
        ("name".to_string(), AttributeType::String),
        ("qualities".to_string(), AttributeType::set(quality_type())),
    ]))
}

fn format_item_type() -> AttributeType {
    AttributeType::object(BTreeMap::from([
        ("format".to_string(), AttributeType::Int64),
        ("name".to_string(), AttributeType::String),
        ("score".to_string(), AttributeType::Int64),
    ]))
}

impl ResourceModel for QualityProfile {
    type Dto = QualityProfileResource;

    const NAME: &'static str = "quality_profile";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Quality Profile resource.")
            .with_attribute("id", Attribute::id().with_description("Quality Profile ID."))
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Quality Profile Name."),
            )
            .with_attribute(
                "upgrade_allowed",
                Attribute::optional_bool().with_description("Upgrade allowed flag."),
            )
            .with_attribute(
                "cutoff",
                Attribute::optional_int64().with_description("Quality ID to which cutoff."),
            )
            .with_attribute(
                "cutoff_format_score",
                Attribute::optional_int64().with_description("Cutoff format score."),
            )
            .with_attribute(
                "min_format_score",
                Attribute::optional_int64().with_description("Min format score."),
            )
            .with_attribute(
                "quality_groups",
                Attribute::new(AttributeType::set(group_type()), AttributeFlags::required())
                    .with_description("Quality groups."),
            )
            .with_attribute(
                "format_items",
                Attribute::new(
                    AttributeType::set(format_item_type()),
                    AttributeFlags::optional_computed(),
                )
                .with_description("Format items. Only the ones with score > 0 are kept."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.quality_profiles()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> QualityProfileResource {
        QualityProfileResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            upgrade_allowed: self.upgrade_allowed.unwrap_or_default(),
            cutoff: self.cutoff.unwrap_or_default(),
            items: self
                .quality_groups
                .iter()
                .flatten()
                .map(QualityGroup::to_api)
                .collect(),
            min_format_score: self.min_format_score.unwrap_or_default(),
            cutoff_format_score: self.cutoff_format_score.unwrap_or_default(),
            format_items: self
                .format_items
                .iter()
                .flatten()
                .map(|f| ProfileFormatItem {
                    format: f.format.unwrap_or_default(),
                    name: f.name.clone().unwrap_or_default(),
                    score: f.score.unwrap_or_default(),
                })
                .collect(),
        }
    }

    fn write_api(&mut self, dto: &QualityProfileResource) {
        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            upgrade_allowed: Some(dto.upgrade_allowed),
            cutoff: Some(dto.cutoff),
            cutoff_format_score: Some(dto.cutoff_format_score),
            min_format_score: Some(dto.min_format_score),
            quality_groups: Some(
                dto.items
                    .iter()
                    .filter(|i| i.allowed)
                    .map(QualityGroup::from_api)
                    .collect(),
            ),
            format_items: Some(
                dto.format_items
                    .iter()
                    .filter(|f| f.score != 0)
                    .map(|f| FormatItem {
                        format: Some(f.format),
                        name: Some(f.name.clone()),
                        score: Some(f.score),
                    })
                    .collect(),
            ),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::assert_schema_matches_model;
    use crate::validation::validate;
    use serde_json::json;

    fn quality(id: i64, name: &str) -> QualityRef {
        QualityRef {
            id: Some(id),
            name: Some(name.to_string()),
        }
    }

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<QualityProfile>();
    }

    #[test]
    fn test_groups_to_items() {
        let profile = QualityProfile {
            name: Some("Ebook".to_string()),
            cutoff: Some(1001),
            quality_groups: Some(vec![
                QualityGroup {
                    id: Some(3),
                    name: Some("EPUB".to_string()),
                    qualities: Some(vec![quality(3, "EPUB")]),
                },
                QualityGroup {
                    id: Some(1001),
                    name: Some("Kindle".to_string()),
                    qualities: Some(vec![quality(1, "MOBI"), quality(2, "AZW3")]),
                },
            ]),
            ..Default::default()
        };

        let body = serde_json::to_value(profile.to_api()).unwrap();
        assert_eq!(
            body["items"][0],
            json!({"quality": {"id": 3, "name": "EPUB"}, "items": [], "allowed": true})
        );
        assert_eq!(body["items"][1]["id"], 1001);
        assert_eq!(body["items"][1]["name"], "Kindle");
        assert_eq!(body["items"][1]["items"][1]["quality"]["name"], "AZW3");
        assert!(body["items"][1].get("quality").is_none());
    }

    #[test]
    fn test_write_api_keeps_allowed_and_scored() {
        let dto: QualityProfileResource = serde_json::from_value(json!({
            "id": 1,
            "name": "Ebook",
            "upgradeAllowed": true,
            "cutoff": 3,
            "items": [
                {"quality": {"id": 0, "name": "Unknown Text"}, "items": [], "allowed": false},
                {"quality": {"id": 3, "name": "EPUB"}, "items": [], "allowed": true},
                {"id": 1001, "name": "Kindle", "allowed": true, "items": [
                    {"quality": {"id": 1, "name": "MOBI"}, "items": [], "allowed": true},
                    {"quality": {"id": 2, "name": "AZW3"}, "items": [], "allowed": true}
                ]}
            ],
            "formatItems": [
                {"format": 1, "name": "retail", "score": 10},
                {"format": 2, "name": "scan", "score": 0}
            ]
        }))
        .unwrap();

        let mut profile = QualityProfile::default();
        profile.write_api(&dto);

        let groups = profile.quality_groups.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].qualities, Some(vec![quality(3, "EPUB")]));
        assert_eq!(groups[1].id, Some(1001));
        assert_eq!(groups[1].qualities.as_ref().map(Vec::len), Some(2));

        let formats = profile.format_items.unwrap();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].score, Some(10));
    }

    #[test]
    fn test_nested_groups_validate() {
        let config = json!({
            "id": null,
            "name": "Ebook",
            "upgrade_allowed": null,
            "cutoff": null,
            "cutoff_format_score": null,
            "min_format_score": null,
            "quality_groups": [{"id": 3, "name": "EPUB", "qualities": [{"id": 3, "name": "EPUB"}]}],
            "format_items": null
        });
        assert!(validate(&QualityProfile::schema(), &config).is_empty());
    }
}
