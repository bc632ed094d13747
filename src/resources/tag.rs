//! Tags.

use serde::{Deserialize, Serialize};

use super::ResourceModel;
use crate::client::models::TagResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

/// A label that links authors to profiles, indexers and clients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag ID.
    pub id: Option<i64>,
    /// Tag value.
    pub label: Option<String>,
}

impl ResourceModel for Tag {
    type Dto = TagResource;

    const NAME: &'static str = "tag";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Tag resource.")
            .with_attribute("id", Attribute::id().with_description("Tag ID."))
            .with_attribute(
                "label",
                Attribute::required_string().with_description("Tag label. It must be lowercase."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.tags()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> TagResource {
        TagResource {
            id: self.id.unwrap_or_default(),
            label: self.label.clone().unwrap_or_default(),
        }
    }

    fn write_api(&mut self, dto: &TagResource) {
        self.id = Some(dto.id);
        self.label = Some(dto.label.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::assert_schema_matches_model;

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<Tag>();
    }

    #[test]
    fn test_mapping() {
        let mut tag = Tag {
            id: None,
            label: Some("books".to_string()),
        };
        assert_eq!(tag.to_api().label, "books");

        tag.write_api(&TagResource {
            id: 7,
            label: "books".to_string(),
        });
        assert_eq!(tag.id, Some(7));
    }
}
