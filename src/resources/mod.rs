//! Managed resources.
//!
//! Almost every Readarr object follows the same lifecycle: build a DTO from
//! the planned model, send it, and write the response back into the model.
//! [`ResourceModel`] captures the per-type mapping and [`ModelResource`]
//! turns it into a [`Resource`] the provider can dispatch to. Config
//! singletons go through [`settings::SettingsResource`] instead.

/// Implements [`ResourceModel`] for an implementation-specific model by
/// converting through its generic family model.
macro_rules! variant_model {
    ($model:ty, $generic:ty, $name:literal) => {
        impl $crate::resources::ResourceModel for $model {
            type Dto = <$generic as $crate::resources::ResourceModel>::Dto;

            const NAME: &'static str = $name;

            fn schema() -> $crate::schema::Schema {
                <$model>::resource_schema()
            }

            fn endpoint(
                client: &$crate::client::ReadarrClient,
            ) -> $crate::client::Endpoint<'_, Self::Dto> {
                <$generic as $crate::resources::ResourceModel>::endpoint(client)
            }

            fn id(&self) -> i64 {
                self.id.unwrap_or_default()
            }

            fn to_api(&self) -> Self::Dto {
                let generic = <$generic>::from(self.clone());
                <$generic as $crate::resources::ResourceModel>::to_api(&generic)
            }

            fn write_api(&mut self, dto: &Self::Dto) {
                let mut generic = <$generic>::from(self.clone());
                <$generic as $crate::resources::ResourceModel>::write_api(&mut generic, dto);
                *self = generic.into();
            }
        }
    };
}

pub(crate) use variant_model;

pub mod custom_format;
pub mod delay_profile;
pub mod download_client;
pub mod fields;
pub mod import_list;
pub mod indexer;
pub mod media_management;
pub mod metadata_profile;
pub mod naming;
pub mod notification;
pub mod quality_profile;
pub mod release_profile;
pub mod remote_path_mapping;
pub mod root_folder;
pub mod settings;
pub mod tag;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::trace;

use crate::client::{ClientError, Endpoint, ReadarrClient};
use crate::error::{Operation, ProviderError};
use crate::plan::normalize_state;
use crate::schema::Schema;
use settings::SettingsResource;

/// Prefix shared by every resource and data source type name.
pub const TYPE_PREFIX: &str = "readarr";

/// Full type name of a resource or data source, e.g. `readarr_tag`.
pub fn type_name(name: &str) -> String {
    format!("{TYPE_PREFIX}_{name}")
}

/// A resource type the provider can plan and apply.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Name without the provider prefix, e.g. `tag`.
    fn name(&self) -> &'static str;

    /// Attribute schema.
    fn schema(&self) -> Schema;

    /// Create the object described by `planned` and return the new state.
    async fn create(&self, client: &ReadarrClient, planned: Value) -> Result<Value, ProviderError>;

    /// Refresh `state` from the API.
    async fn read(&self, client: &ReadarrClient, state: Value) -> Result<Value, ProviderError>;

    /// Apply `planned` to the object recorded in `prior`.
    async fn update(
        &self,
        client: &ReadarrClient,
        prior: Value,
        planned: Value,
    ) -> Result<Value, ProviderError>;

    /// Remove the object recorded in `state`.
    async fn delete(&self, client: &ReadarrClient, state: Value) -> Result<(), ProviderError>;

    /// Build the full state of an existing object from its import identifier.
    async fn import(&self, client: &ReadarrClient, id: &str) -> Result<Value, ProviderError>;
}

/// Typed state of a resource, mapped onto one Readarr DTO.
///
/// Fields are `Option`s so that null and unknown values survive a round
/// trip through state.
#[async_trait]
pub trait ResourceModel:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static
{
    /// Request/response body.
    type Dto: Serialize + DeserializeOwned + Send + Sync;

    /// Name without the provider prefix.
    const NAME: &'static str;

    /// Attribute schema.
    fn schema() -> Schema;

    /// The collection this model lives in.
    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto>;

    /// Readarr object id, 0 while unknown.
    fn id(&self) -> i64;

    /// Build the request body.
    fn to_api(&self) -> Self::Dto;

    /// Overwrite the model with what Readarr returned.
    fn write_api(&mut self, dto: &Self::Dto);

    /// POST the model. Types that need a follow-up call override this.
    async fn create_remote(&self, client: &ReadarrClient) -> Result<Self::Dto, ProviderError> {
        Self::endpoint(client)
            .create(&self.to_api())
            .await
            .map_err(|e| ProviderError::client(Operation::Create, type_name(Self::NAME), e))
    }
}

/// Parse a numeric import identifier.
pub(crate) fn parse_import_id(id: &str) -> Result<i64, ProviderError> {
    id.trim()
        .parse()
        .map_err(|_| ProviderError::ImportIdentifier(id.to_string()))
}

/// Null attributes of `planned` take their `prior` value, so an update never
/// sends defaults for settings the plan left unknown.
pub(crate) fn fill_from_prior(mut planned: Value, prior: &Value) -> Value {
    if let (Value::Object(planned), Value::Object(prior)) = (&mut planned, prior) {
        for (name, value) in prior.iter().filter(|(_, v)| !v.is_null()) {
            let slot = planned.entry(name.clone()).or_insert(Value::Null);
            if slot.is_null() {
                *slot = value.clone();
            }
        }
    }
    planned
}

/// Adapts a [`ResourceModel`] to the [`Resource`] interface.
pub struct ModelResource<M>(PhantomData<fn() -> M>);

impl<M> ModelResource<M> {
    /// Create the adapter.
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<M> Default for ModelResource<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ResourceModel> ModelResource<M> {
    fn error(operation: Operation, source: ClientError) -> ProviderError {
        ProviderError::client(operation, type_name(M::NAME), source)
    }

    fn model(mut state: Value) -> Result<M, ProviderError> {
        normalize_state(&M::schema(), &mut state);
        Ok(serde_json::from_value(state)?)
    }

    fn finish(mut model: M, dto: &M::Dto) -> Result<Value, ProviderError> {
        model.write_api(dto);
        Ok(serde_json::to_value(model)?)
    }
}

#[async_trait]
impl<M: ResourceModel> Resource for ModelResource<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn schema(&self) -> Schema {
        M::schema()
    }

    async fn create(&self, client: &ReadarrClient, planned: Value) -> Result<Value, ProviderError> {
        let model: M = Self::model(planned)?;
        let dto = model.create_remote(client).await?;

        let state = Self::finish(model, &dto)?;
        trace!(resource = M::NAME, id = %state["id"], "created");
        Ok(state)
    }

    async fn read(&self, client: &ReadarrClient, state: Value) -> Result<Value, ProviderError> {
        let model: M = Self::model(state)?;
        let dto = M::endpoint(client)
            .get(model.id())
            .await
            .map_err(|e| Self::error(Operation::Read, e))?;

        trace!(resource = M::NAME, id = model.id(), "read");
        Self::finish(model, &dto)
    }

    async fn update(
        &self,
        client: &ReadarrClient,
        prior: Value,
        planned: Value,
    ) -> Result<Value, ProviderError> {
        let model: M = Self::model(fill_from_prior(planned, &prior))?;
        let dto = M::endpoint(client)
            .update(model.id(), &model.to_api())
            .await
            .map_err(|e| Self::error(Operation::Update, e))?;

        trace!(resource = M::NAME, id = model.id(), "updated");
        Self::finish(model, &dto)
    }

    async fn delete(&self, client: &ReadarrClient, state: Value) -> Result<(), ProviderError> {
        let model: M = Self::model(state)?;
        M::endpoint(client)
            .delete(model.id())
            .await
            .map_err(|e| Self::error(Operation::Delete, e))?;

        trace!(resource = M::NAME, id = model.id(), "deleted");
        Ok(())
    }

    async fn import(&self, client: &ReadarrClient, id: &str) -> Result<Value, ProviderError> {
        let id = parse_import_id(id)?;
        let dto = M::endpoint(client)
            .get(id)
            .await
            .map_err(|e| Self::error(Operation::Read, e))?;

        trace!(resource = M::NAME, id, "imported");
        Self::finish(M::default(), &dto)
    }
}

/// Every resource the provider serves.
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(ModelResource::<custom_format::CustomFormat>::new()),
        Box::new(ModelResource::<delay_profile::DelayProfile>::new()),
        Box::new(ModelResource::<download_client::DownloadClient>::new()),
        Box::new(ModelResource::<download_client::DownloadClientDeluge>::new()),
        Box::new(ModelResource::<download_client::DownloadClientNzbget>::new()),
        Box::new(ModelResource::<download_client::DownloadClientQbittorrent>::new()),
        Box::new(ModelResource::<download_client::DownloadClientSabnzbd>::new()),
        Box::new(ModelResource::<download_client::DownloadClientTransmission>::new()),
        Box::new(ModelResource::<download_client::DownloadClientUsenetDownloadStation>::new()),
        Box::new(ModelResource::<import_list::ImportList>::new()),
        Box::new(ModelResource::<import_list::ImportListLazyLibrarian>::new()),
        Box::new(ModelResource::<import_list::ImportListReadarr>::new()),
        Box::new(ModelResource::<indexer::Indexer>::new()),
        Box::new(ModelResource::<indexer::IndexerFilelist>::new()),
        Box::new(ModelResource::<indexer::IndexerIptorrents>::new()),
        Box::new(ModelResource::<indexer::IndexerNewznab>::new()),
        Box::new(ModelResource::<indexer::IndexerTorrentRss>::new()),
        Box::new(ModelResource::<indexer::IndexerTorznab>::new()),
        Box::new(SettingsResource::<media_management::MediaManagement>::new()),
        Box::new(ModelResource::<metadata_profile::MetadataProfile>::new()),
        Box::new(SettingsResource::<naming::Naming>::new()),
        Box::new(ModelResource::<notification::Notification>::new()),
        Box::new(ModelResource::<notification::NotificationCustomScript>::new()),
        Box::new(ModelResource::<notification::NotificationGotify>::new()),
        Box::new(ModelResource::<notification::NotificationTelegram>::new()),
        Box::new(ModelResource::<notification::NotificationWebhook>::new()),
        Box::new(ModelResource::<quality_profile::QualityProfile>::new()),
        Box::new(ModelResource::<release_profile::ReleaseProfile>::new()),
        Box::new(ModelResource::<remote_path_mapping::RemotePathMapping>::new()),
        Box::new(ModelResource::<root_folder::RootFolder>::new()),
        Box::new(ModelResource::<tag::Tag>::new()),
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every schema attribute must be a model field and vice versa.
    pub(crate) fn assert_schema_matches_model<M: ResourceModel>() {
        let state = serde_json::to_value(M::default()).unwrap();
        let fields: Vec<_> = state.as_object().unwrap().keys().cloned().collect();
        let attributes: Vec<_> = M::schema().block.attributes.keys().cloned().collect();
        assert_eq!(fields.len(), attributes.len(), "{}", M::NAME);
        for field in &fields {
            assert!(attributes.contains(field), "{}: {} not in schema", M::NAME, field);
        }
    }

    #[test]
    fn test_parse_import_id() {
        assert_eq!(parse_import_id("12").unwrap(), 12);
        assert_eq!(parse_import_id(" 3 ").unwrap(), 3);

        let err = parse_import_id("abc").unwrap_err();
        assert_eq!(err.summary(), "Unexpected Import Identifier");
    }

    #[test]
    fn test_fill_from_prior() {
        let prior = serde_json::json!({"id": 3, "order": 4, "tags": [1], "usenet_delay": 0});
        let planned = serde_json::json!({"id": null, "order": null, "usenet_delay": 60});

        let filled = fill_from_prior(planned, &prior);
        assert_eq!(
            filled,
            serde_json::json!({"id": 3, "order": 4, "tags": [1], "usenet_delay": 60})
        );
    }

    #[test]
    fn test_registry_names_unique() {
        let resources = all();
        let mut names: Vec<_> = resources.iter().map(|r| r.name()).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
        assert!(names.contains(&"download_client_qbittorrent"));
        assert!(names.contains(&"naming"));
        assert!(names.contains(&"media_management"));
        assert!(names.contains(&"import_list_readarr"));
        assert_eq!(count, 31);
    }

    #[test]
    fn test_every_schema_has_id() {
        for resource in all() {
            assert!(
                resource.schema().attribute("id").is_some(),
                "{} has no id attribute",
                resource.name()
            );
        }
    }
}
