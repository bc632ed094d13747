//! Read-only views of the config singletons.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use super::DataSource;
use crate::client::ReadarrClient;
use crate::error::{Operation, ProviderError};
use crate::resources::settings::SettingsModel;
use crate::resources::type_name;
use crate::schema::Schema;

/// Reads a [`SettingsModel`] singleton.
pub struct SettingsDataSource<M>(PhantomData<fn() -> M>);

impl<M> SettingsDataSource<M> {
    /// Create the data source.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<M> Default for SettingsDataSource<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<M: SettingsModel> DataSource for SettingsDataSource<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn schema(&self) -> Schema {
        let schema = M::schema().into_computed();
        let description = schema
            .block
            .description
            .as_deref()
            .unwrap_or_default()
            .replace(" resource.", " data source.");
        schema.with_description(description)
    }

    async fn read(&self, client: &ReadarrClient, _config: Value) -> Result<Value, ProviderError> {
        let dto = M::settings(client)
            .get()
            .await
            .map_err(|e| ProviderError::client(Operation::Read, type_name(M::NAME), e))?;

        trace!(data_source = M::NAME, "read");
        Ok(serde_json::to_value(M::from_api(&dto))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::media_management::MediaManagement;
    use crate::resources::naming::Naming;
    use secrecy::SecretString;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_schema_read_only() {
        let schema = SettingsDataSource::<Naming>::new().schema();
        assert_eq!(schema.block.description.as_deref(), Some("Naming data source."));
        assert!(schema
            .block
            .attributes
            .values()
            .all(|a| a.flags.is_computed_only()));

        let schema = SettingsDataSource::<MediaManagement>::new().schema();
        assert!(schema.attribute("recycle_bin").unwrap().flags.is_computed_only());
        assert!(schema.attribute("file_date").unwrap().validators.is_empty());
    }

    #[tokio::test]
    async fn test_read() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/config/naming"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "renameBooks": true,
                "replaceIllegalCharacters": true,
                "colonReplacementFormat": 4,
                "authorFolderFormat": "{Author Name}",
                "standardBookFormat": "{Book Title}"
            })))
            .mount(&server)
            .await;

        let client =
            ReadarrClient::new(&Url::parse(&server.uri()).unwrap(), &SecretString::from("key"))
                .unwrap();
        let state = SettingsDataSource::<Naming>::new()
            .read(&client, Value::Null)
            .await
            .unwrap();
        assert_eq!(state["id"], 1);
        assert_eq!(state["colon_replacement_format"], 4);
        assert_eq!(state["author_folder_format"], "{Author Name}");
    }
}
