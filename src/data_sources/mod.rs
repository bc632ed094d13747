//! Read-only data sources.
//!
//! Most data sources are derived from a resource model: a singular lookup
//! finds one object by name, label or id, and a list returns the whole
//! collection keyed by its element count.

pub mod settings;

use std::marker::PhantomData;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::trace;

use crate::client::ReadarrClient;
use crate::error::{Operation, ProviderError};
use crate::resources::custom_format::CustomFormat;
use crate::resources::delay_profile::DelayProfile;
use crate::resources::download_client::DownloadClient;
use crate::resources::import_list::ImportList;
use crate::resources::indexer::Indexer;
use crate::resources::media_management::MediaManagement;
use crate::resources::metadata_profile::MetadataProfile;
use crate::resources::naming::Naming;
use crate::resources::notification::Notification;
use crate::resources::quality_profile::QualityProfile;
use crate::resources::release_profile::ReleaseProfile;
use crate::resources::remote_path_mapping::RemotePathMapping;
use crate::resources::root_folder::RootFolder;
use crate::resources::tag::Tag;
use crate::resources::{type_name, ResourceModel};
use crate::schema::{Attribute, AttributeFlags, AttributeType, Schema};

/// A data source type the provider can read.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Name without the provider prefix, e.g. `tags`.
    fn name(&self) -> &'static str;

    /// Attribute schema.
    fn schema(&self) -> Schema;

    /// Read the data source for the given configuration.
    async fn read(&self, client: &ReadarrClient, config: Value) -> Result<Value, ProviderError>;
}

/// Build the state of a list data source.
pub(crate) fn list_state(key: &str, items: Vec<Value>) -> Value {
    let mut state = Map::new();
    state.insert("id".to_string(), json!(items.len().to_string()));
    state.insert(key.to_string(), Value::Array(items));
    Value::Object(state)
}

/// Schema of a list data source whose elements have `element` attributes.
pub(crate) fn list_schema(description: String, key: &str, element: &Schema) -> Schema {
    let mut items = Attribute::new(
        AttributeType::set(element.object_type()),
        AttributeFlags::computed(),
    )
    .with_description(format!("{description}."));
    if element.has_sensitive() {
        items = items.sensitive();
    }

    Schema::v0()
        .with_description(description)
        .with_attribute("id", Attribute::computed_string())
        .with_attribute(key, items)
}

/// Every object of a collection.
pub struct ListDataSource<M> {
    name: &'static str,
    _model: PhantomData<fn() -> M>,
}

impl<M> ListDataSource<M> {
    /// List data source `name`, which is also the attribute holding the objects.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _model: PhantomData,
        }
    }
}

#[async_trait]
impl<M: ResourceModel> DataSource for ListDataSource<M> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn schema(&self) -> Schema {
        list_schema(
            format!("List all available {}", self.name.replace('_', " ")),
            self.name,
            &M::schema(),
        )
    }

    async fn read(&self, client: &ReadarrClient, _config: Value) -> Result<Value, ProviderError> {
        let dtos = M::endpoint(client)
            .list()
            .await
            .map_err(|e| ProviderError::client(Operation::List, type_name(self.name), e))?;

        let items = dtos
            .iter()
            .map(|dto| {
                let mut model = M::default();
                model.write_api(dto);
                serde_json::to_value(model)
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!(data_source = self.name, count = items.len(), "read");
        Ok(list_state(self.name, items))
    }
}

/// A single object, found by `field`.
///
/// Looking up by `id` fetches the object directly; any other field searches
/// the collection client side.
pub struct LookupDataSource<M> {
    field: &'static str,
    _model: PhantomData<fn() -> M>,
}

impl<M> LookupDataSource<M> {
    /// Lookup data source keyed by `field`.
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            _model: PhantomData,
        }
    }
}

impl<M: ResourceModel> LookupDataSource<M> {
    fn error(operation: Operation, source: crate::client::ClientError) -> ProviderError {
        ProviderError::client(operation, type_name(M::NAME), source)
    }

    async fn by_id(&self, client: &ReadarrClient, id: i64) -> Result<M, ProviderError> {
        let dto = M::endpoint(client)
            .get(id)
            .await
            .map_err(|e| Self::error(Operation::Read, e))?;

        let mut model = M::default();
        model.write_api(&dto);
        Ok(model)
    }

    async fn search(&self, client: &ReadarrClient, wanted: &Value) -> Result<Value, ProviderError> {
        let dtos = M::endpoint(client)
            .list()
            .await
            .map_err(|e| Self::error(Operation::Read, e))?;

        for dto in &dtos {
            let mut model = M::default();
            model.write_api(dto);
            let state = serde_json::to_value(model)?;
            if state.get(self.field) == Some(wanted) {
                return Ok(state);
            }
        }

        let shown = match wanted {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Err(ProviderError::not_found(type_name(M::NAME), self.field, shown))
    }
}

#[async_trait]
impl<M: ResourceModel> DataSource for LookupDataSource<M> {
    fn name(&self) -> &'static str {
        M::NAME
    }

    fn schema(&self) -> Schema {
        M::schema().into_lookup(self.field)
    }

    async fn read(&self, client: &ReadarrClient, config: Value) -> Result<Value, ProviderError> {
        let wanted = config.get(self.field).cloned().unwrap_or(Value::Null);

        let state = match (self.field, wanted.as_i64()) {
            ("id", Some(id)) => serde_json::to_value(self.by_id(client, id).await?)?,
            _ => self.search(client, &wanted).await?,
        };

        trace!(data_source = M::NAME, field = self.field, "read");
        Ok(state)
    }
}

/// Every data source the provider serves.
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(LookupDataSource::<CustomFormat>::new("name")),
        Box::new(ListDataSource::<CustomFormat>::new("custom_formats")),
        Box::new(LookupDataSource::<DelayProfile>::new("id")),
        Box::new(ListDataSource::<DelayProfile>::new("delay_profiles")),
        Box::new(LookupDataSource::<DownloadClient>::new("name")),
        Box::new(ListDataSource::<DownloadClient>::new("download_clients")),
        Box::new(LookupDataSource::<ImportList>::new("name")),
        Box::new(ListDataSource::<ImportList>::new("import_lists")),
        Box::new(LookupDataSource::<Indexer>::new("name")),
        Box::new(ListDataSource::<Indexer>::new("indexers")),
        Box::new(settings::SettingsDataSource::<MediaManagement>::new()),
        Box::new(LookupDataSource::<MetadataProfile>::new("name")),
        Box::new(ListDataSource::<MetadataProfile>::new("metadata_profiles")),
        Box::new(settings::SettingsDataSource::<Naming>::new()),
        Box::new(LookupDataSource::<Notification>::new("name")),
        Box::new(ListDataSource::<Notification>::new("notifications")),
        Box::new(LookupDataSource::<QualityProfile>::new("name")),
        Box::new(ListDataSource::<QualityProfile>::new("quality_profiles")),
        Box::new(LookupDataSource::<ReleaseProfile>::new("id")),
        Box::new(ListDataSource::<ReleaseProfile>::new("release_profiles")),
        Box::new(LookupDataSource::<RemotePathMapping>::new("id")),
        Box::new(ListDataSource::<RemotePathMapping>::new("remote_path_mappings")),
        Box::new(LookupDataSource::<RootFolder>::new("path")),
        Box::new(ListDataSource::<RootFolder>::new("root_folders")),
        Box::new(LookupDataSource::<Tag>::new("label")),
        Box::new(ListDataSource::<Tag>::new("tags")),
    ]
}
