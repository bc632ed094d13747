//! The Readarr provider: dispatches protocol calls to resources and data
//! sources by type name.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::client::ReadarrClient;
use crate::config::ProviderConfig;
use crate::data_sources::{self, DataSource};
use crate::error::ProviderError;
use crate::resources::{self, type_name, Resource};
use crate::schema::{Diagnostic, ProviderSchema};
use crate::server::ProviderService;
use crate::types::{ImportedResource, PlanResult};
use crate::validation::validate;

/// Provider serving every `readarr_*` resource and data source.
pub struct ReadarrProvider {
    client: RwLock<Option<Arc<ReadarrClient>>>,
    resources: BTreeMap<String, Box<dyn Resource>>,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl ReadarrProvider {
    /// An unconfigured provider with all types registered.
    pub fn new() -> Self {
        Self {
            client: RwLock::new(None),
            resources: resources::all()
                .into_iter()
                .map(|r| (type_name(r.name()), r))
                .collect(),
            data_sources: data_sources::all()
                .into_iter()
                .map(|d| (type_name(d.name()), d))
                .collect(),
        }
    }

    async fn client(&self) -> Result<Arc<ReadarrClient>, ProviderError> {
        self.client.read().await.clone().ok_or_else(|| {
            ProviderError::Configuration(
                "the provider must be configured before use".to_string(),
            )
        })
    }

    fn resource(&self, resource_type: &str) -> Result<&dyn Resource, ProviderError> {
        self.resources
            .get(resource_type)
            .map(|r| r.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(resource_type.to_string()))
    }

    fn data_source(&self, data_source_type: &str) -> Result<&dyn DataSource, ProviderError> {
        self.data_sources
            .get(data_source_type)
            .map(|d| d.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(data_source_type.to_string()))
    }
}

impl Default for ReadarrProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProviderService for ReadarrProvider {
    fn schema(&self) -> ProviderSchema {
        let schema = ProviderSchema::new().with_provider_config(ProviderConfig::schema());

        let schema = self
            .resources
            .iter()
            .fold(schema, |s, (name, r)| s.with_resource(name.clone(), r.schema()));

        self.data_sources
            .iter()
            .fold(schema, |s, (name, d)| s.with_data_source(name.clone(), d.schema()))
    }

    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&ProviderConfig::schema(), &config))
    }

    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let resolved = match ProviderConfig::from_value(config)?.resolve() {
            Ok(resolved) => resolved,
            Err(diagnostics) => return Ok(diagnostics),
        };

        let client = match ReadarrClient::new(&resolved.url, &resolved.api_key) {
            Ok(client) => client,
            Err(e) => {
                return Ok(vec![Diagnostic::error("Unable to create Readarr client")
                    .with_detail(e.to_string())])
            }
        };

        info!(url = %resolved.url, "configured");
        *self.client.write().await = Some(Arc::new(client));
        Ok(vec![])
    }

    async fn stop(&self) -> Result<(), ProviderError> {
        self.client.write().await.take();
        debug!("client released");
        Ok(())
    }

    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&self.resource(resource_type)?.schema(), &config))
    }

    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        let schema = self.resource(resource_type)?.schema();
        Ok(crate::plan::plan(
            &schema,
            prior_state.as_ref(),
            &proposed_state,
            &config,
        ))
    }

    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        resource.create(&*self.client().await?, planned_state).await
    }

    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        resource.read(&*self.client().await?, current_state).await
    }

    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError> {
        let resource = self.resource(resource_type)?;
        resource
            .update(&*self.client().await?, prior_state, planned_state)
            .await
    }

    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError> {
        let resource = self.resource(resource_type)?;
        resource.delete(&*self.client().await?, current_state).await
    }

    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        let resource = self.resource(resource_type)?;
        let state = resource.import(&*self.client().await?, id).await?;
        Ok(vec![ImportedResource::new(resource_type, state)])
    }

    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        Ok(validate(&self.data_source(data_source_type)?.schema(), &config))
    }

    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        let data_source = self.data_source(data_source_type)?;
        data_source.read(&*self.client().await?, config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_schema_lists_every_type() {
        let schema = ReadarrProvider::new().schema();
        assert!(schema.provider.attribute("api_key").unwrap().flags.sensitive);
        assert!(schema.resources.contains_key("readarr_tag"));
        assert!(schema.resources.contains_key("readarr_download_client_transmission"));
        assert!(schema.data_sources.contains_key("readarr_tags"));
        assert!(schema.data_sources.contains_key("readarr_custom_formats"));
        assert!(schema.resources.contains_key("readarr_quality_profile"));
        assert!(schema.resources.contains_key("readarr_media_management"));
        assert!(schema.data_sources.contains_key("readarr_root_folders"));
        assert!(schema.resources.keys().all(|k| k.starts_with("readarr_")));
    }

    #[tokio::test]
    async fn test_requires_configure() {
        let provider = ReadarrProvider::new();
        let err = provider
            .read("readarr_tag", json!({"id": 1, "label": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_unknown_type() {
        let provider = ReadarrProvider::new();
        let err = provider
            .plan("readarr_author", None, json!({}), json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownResource(_)));

        let err = provider
            .read_data_source("readarr_author", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.summary(), "Unknown Resource Type");
    }

    #[tokio::test]
    async fn test_configure_invalid_url() {
        let provider = ReadarrProvider::new();
        let diags = provider
            .configure(json!({"url": "not a url", "api_key": "key"}))
            .await
            .unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].summary, "Invalid URL");
        assert_err!(provider.client().await);
    }

    #[tokio::test]
    async fn test_configure_and_stop() {
        let provider = ReadarrProvider::new();
        let diags = provider
            .configure(json!({"url": "http://localhost:8787", "api_key": "key"}))
            .await
            .unwrap();
        assert!(diags.is_empty());
        assert_ok!(provider.client().await);

        assert_ok!(provider.stop().await);
        assert_err!(provider.client().await);
    }

    #[tokio::test]
    async fn test_validate_resource_config() {
        let provider = ReadarrProvider::new();
        let diags = provider
            .validate_resource_config("readarr_tag", json!({}))
            .await
            .unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].attribute.as_deref(), Some("label"));
    }
}
