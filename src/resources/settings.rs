//! Config singletons.
//!
//! Readarr keeps some settings (naming, media management) as one object with
//! id 1. Creating such a resource adopts and overwrites it, deleting only
//! forgets it.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use super::{type_name, Resource};
use crate::client::{ClientError, ReadarrClient, Settings};
use crate::error::{Operation, ProviderError};
use crate::plan::normalize_state;
use crate::schema::Schema;

/// Id of every config singleton.
pub const SETTINGS_ID: i64 = 1;

/// Typed state of a config singleton.
pub trait SettingsModel:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// Request/response body.
    type Dto: Serialize + DeserializeOwned + Send + Sync;

    /// Name without the provider prefix.
    const NAME: &'static str;

    /// Attribute schema.
    fn schema() -> Schema;

    /// Where the settings live.
    fn settings(client: &ReadarrClient) -> Settings<'_, Self::Dto>;

    /// Build the request body, pinned to [`SETTINGS_ID`].
    fn to_api(&self) -> Self::Dto;

    /// Build the model from an API response.
    fn from_api(dto: &Self::Dto) -> Self;
}

/// Adapts a [`SettingsModel`] to the [`Resource`] interface.
pub struct SettingsResource<M>(PhantomData<fn() -> M>);

impl<M> SettingsResource<M> {
    /// Create the adapter.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<M> Default for SettingsResource<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: SettingsModel> SettingsResource<M> {
    fn error(operation: Operation, source: ClientError) -> ProviderError {
        ProviderError::client(operation, type_name(M::NAME), source)
    }

    async fn fetch(client: &ReadarrClient, operation: Operation) -> Result<M, ProviderError> {
        let dto = M::settings(client)
            .get()
            .await
            .map_err(|e| Self::error(operation, e))?;
        Ok(M::from_api(&dto))
    }

    async fn put(
        client: &ReadarrClient,
        mut planned: Value,
        operation: Operation,
    ) -> Result<Value, ProviderError> {
        normalize_state(&M::schema(), &mut planned);
        let model: M = serde_json::from_value(planned)?;
        let dto = M::settings(client)
            .update(SETTINGS_ID, &model.to_api())
            .await
            .map_err(|e| Self::error(operation, e))?;
        Ok(serde_json::to_value(M::from_api(&dto))?)
    }
}

#[async_trait]
impl<M: SettingsModel> Resource for SettingsResource<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn schema(&self) -> Schema {
        M::schema()
    }

    async fn create(&self, client: &ReadarrClient, planned: Value) -> Result<Value, ProviderError> {
        // A fresh instance rejects the first PUT unless the config was read once.
        Self::fetch(client, Operation::Init).await?;

        let state = Self::put(client, planned, Operation::Create).await?;
        trace!(resource = M::NAME, id = SETTINGS_ID, "created");
        Ok(state)
    }

    async fn read(&self, client: &ReadarrClient, _state: Value) -> Result<Value, ProviderError> {
        let model = Self::fetch(client, Operation::Read).await?;
        trace!(resource = M::NAME, id = SETTINGS_ID, "read");
        Ok(serde_json::to_value(model)?)
    }

    async fn update(
        &self,
        client: &ReadarrClient,
        prior: Value,
        planned: Value,
    ) -> Result<Value, ProviderError> {
        let state = Self::put(client, super::fill_from_prior(planned, &prior), Operation::Update)
            .await?;
        trace!(resource = M::NAME, id = SETTINGS_ID, "updated");
        Ok(state)
    }

    async fn delete(&self, _client: &ReadarrClient, _state: Value) -> Result<(), ProviderError> {
        trace!(resource = M::NAME, id = SETTINGS_ID, "deleted");
        Ok(())
    }

    async fn import(&self, client: &ReadarrClient, _id: &str) -> Result<Value, ProviderError> {
        let model = Self::fetch(client, Operation::Read).await?;
        let mut state = serde_json::to_value(model)?;
        if let Some(obj) = state.as_object_mut() {
            obj.insert("id".to_string(), Value::from(SETTINGS_ID));
        }
        trace!(resource = M::NAME, id = SETTINGS_ID, "imported");
        Ok(state)
    }
}
