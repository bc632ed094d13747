//! Remote path mappings.

use serde::{Deserialize, Serialize};

use super::ResourceModel;
use crate::client::models::RemotePathMappingResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

/// Maps a download client's path to the path Readarr sees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemotePathMapping {
    /// Remote Path Mapping ID.
    pub id: Option<i64>,
    /// Download client host.
    pub host: Option<String>,
    /// Path as reported by the download client.
    pub remote_path: Option<String>,
    /// Path as seen by Readarr.
    pub local_path: Option<String>,
}

impl ResourceModel for RemotePathMapping {
    type Dto = RemotePathMappingResource;

    const NAME: &'static str = "remote_path_mapping";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Remote Path Mapping resource.")
            .with_attribute("id", Attribute::id().with_description("Remote Path Mapping ID."))
            .with_attribute(
                "host",
                Attribute::required_string().with_description("Download Client host."),
            )
            .with_attribute(
                "remote_path",
                Attribute::required_string().with_description("Download Client remote path."),
            )
            .with_attribute(
                "local_path",
                Attribute::required_string().with_description("Local path."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.remote_path_mappings()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> RemotePathMappingResource {
        RemotePathMappingResource {
            id: self.id.unwrap_or_default(),
            host: self.host.clone().unwrap_or_default(),
            remote_path: self.remote_path.clone().unwrap_or_default(),
            local_path: self.local_path.clone().unwrap_or_default(),
        }
    }

    fn write_api(&mut self, dto: &RemotePathMappingResource) {
        *self = Self {
            id: Some(dto.id),
            host: Some(dto.host.clone()),
            remote_path: Some(dto.remote_path.clone()),
            local_path: Some(dto.local_path.clone()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::assert_schema_matches_model;

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<RemotePathMapping>();
    }

    #[test]
    fn test_to_api() {
        let mapping = RemotePathMapping {
            id: Some(1),
            host: Some("transmission".to_string()),
            remote_path: Some("/download/complete/".to_string()),
            local_path: Some("/books/".to_string()),
        };

        let dto = mapping.to_api();
        assert_eq!(dto.id, 1);
        assert_eq!(dto.remote_path, "/download/complete/");
    }
}
