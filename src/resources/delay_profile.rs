//! Delay profiles.

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{type_name, ResourceModel};
use crate::client::models::DelayProfileResource;
use crate::client::{ClientError, Endpoint, ReadarrClient};
use crate::error::{Operation, ProviderError};
use crate::schema::{Attribute, Schema};

fn error(operation: Operation) -> impl FnOnce(ClientError) -> ProviderError {
    move |e| ProviderError::client(operation, type_name(DelayProfile::NAME), e)
}

/// How long to wait before grabbing a release, per protocol and tag set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayProfile {
    /// Object ID.
    pub id: Option<i64>,
    /// Apply to usenet releases.
    pub enable_usenet: Option<bool>,
    /// Apply to torrent releases.
    pub enable_torrent: Option<bool>,
    /// Minutes to wait before grabbing a usenet release.
    pub usenet_delay: Option<i64>,
    /// Minutes to wait before grabbing a torrent release.
    pub torrent_delay: Option<i64>,
    /// Evaluation order.
    pub order: Option<i64>,
    /// Associated tags.
    pub tags: Option<BTreeSet<i64>>,
    /// Protocol preferred when both are available.
    pub preferred_protocol: Option<String>,
}

#[async_trait]
impl ResourceModel for DelayProfile {
    type Dto = DelayProfileResource;

    const NAME: &'static str = "delay_profile";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Delay Profile resource.")
            .with_attribute("id", Attribute::id().with_description("Delay Profile ID."))
            .with_attribute(
                "enable_usenet",
                Attribute::optional_bool().with_description(
                    "Usenet allowed flag. At least one of `enable_usenet` and `enable_torrent` must be defined.",
                ),
            )
            .with_attribute(
                "enable_torrent",
                Attribute::optional_bool().with_description(
                    "Torrent allowed flag. At least one of `enable_usenet` and `enable_torrent` must be defined.",
                ),
            )
            .with_attribute(
                "usenet_delay",
                Attribute::optional_int64().with_description("Usenet delay."),
            )
            .with_attribute(
                "torrent_delay",
                Attribute::optional_int64().with_description("Torrent delay."),
            )
            .with_attribute("order", Attribute::optional_int64().with_description("Order."))
            .with_attribute(
                "tags",
                Attribute::required_int_set().with_description("List of associated tags."),
            )
            .with_attribute(
                "preferred_protocol",
                Attribute::optional_string()
                    .one_of_string(&["usenet", "torrent"])
                    .with_description("Preferred protocol."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.delay_profiles()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> DelayProfileResource {
        DelayProfileResource {
            id: self.id.unwrap_or_default(),
            enable_usenet: self.enable_usenet.unwrap_or_default(),
            enable_torrent: self.enable_torrent.unwrap_or_default(),
            preferred_protocol: self.preferred_protocol.clone().unwrap_or_default(),
            usenet_delay: self.usenet_delay.unwrap_or_default(),
            torrent_delay: self.torrent_delay.unwrap_or_default(),
            order: self.order.unwrap_or_default(),
            tags: self.tags.iter().flatten().copied().collect(),
        }
    }

    fn write_api(&mut self, dto: &DelayProfileResource) {
        *self = Self {
            id: Some(dto.id),
            enable_usenet: Some(dto.enable_usenet),
            enable_torrent: Some(dto.enable_torrent),
            usenet_delay: Some(dto.usenet_delay),
            torrent_delay: Some(dto.torrent_delay),
            order: Some(dto.order),
            tags: Some(dto.tags.iter().copied().collect()),
            preferred_protocol: Some(dto.preferred_protocol.clone()),
        };
    }

    /// Readarr assigns the order of a new profile itself, so a configured
    /// order is applied with a second PUT.
    async fn create_remote(&self, client: &ReadarrClient) -> Result<Self::Dto, ProviderError> {
        let endpoint = Self::endpoint(client);
        let created = endpoint
            .create(&self.to_api())
            .await
            .map_err(error(Operation::Create))?;

        match self.order {
            Some(order) if order != created.order => {
                let reordered = DelayProfileResource { order, ..created };
                endpoint
                    .update(reordered.id, &reordered)
                    .await
                    .map_err(error(Operation::Update))
            }
            _ => Ok(created),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::assert_schema_matches_model;
    use secrecy::SecretString;
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> ReadarrClient {
        ReadarrClient::new(&Url::parse(uri).unwrap(), &SecretString::from("key")).unwrap()
    }

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<DelayProfile>();
        assert!(DelayProfile::schema().attribute("tags").unwrap().flags.required);
    }

    #[test]
    fn test_write_api() {
        let mut profile = DelayProfile::default();
        profile.write_api(&DelayProfileResource {
            id: 2,
            enable_usenet: true,
            preferred_protocol: "usenet".to_string(),
            usenet_delay: 60,
            order: 3,
            tags: vec![1],
            ..Default::default()
        });

        assert_eq!(profile.id, Some(2));
        assert_eq!(profile.enable_torrent, Some(false));
        assert_eq!(profile.preferred_protocol.as_deref(), Some("usenet"));
        assert_eq!(profile.tags, Some(BTreeSet::from([1])));
    }

    #[tokio::test]
    async fn test_create_applies_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/delayprofile"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 5, "enableUsenet": true, "preferredProtocol": "usenet",
                "order": 2147483647, "tags": [1]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/delayprofile/5"))
            .and(body_partial_json(json!({"id": 5, "order": 1})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "id": 5, "enableUsenet": true, "preferredProtocol": "usenet",
                "order": 1, "tags": [1]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = DelayProfile {
            enable_usenet: Some(true),
            preferred_protocol: Some("usenet".to_string()),
            order: Some(1),
            tags: Some(BTreeSet::from([1])),
            ..Default::default()
        };

        let dto = profile.create_remote(&client(&server.uri())).await.unwrap();
        assert_eq!(dto.order, 1);
    }

    #[tokio::test]
    async fn test_create_without_order_skips_update() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/delayprofile"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 6, "enableTorrent": true, "preferredProtocol": "torrent",
                "order": 4, "tags": [2]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let profile = DelayProfile {
            enable_torrent: Some(true),
            tags: Some(BTreeSet::from([2])),
            ..Default::default()
        };

        let dto = profile.create_remote(&client(&server.uri())).await.unwrap();
        assert_eq!(dto.order, 4);
    }

    #[tokio::test]
    async fn test_create_reorder_failure_is_update_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/delayprofile"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 7, "enableUsenet": true, "order": 3, "tags": [1]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/delayprofile/7"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let profile = DelayProfile {
            enable_usenet: Some(true),
            order: Some(1),
            tags: Some(BTreeSet::from([1])),
            ..Default::default()
        };

        let err = profile
            .create_remote(&client(&server.uri()))
            .await
            .unwrap_err();
        assert!(
            err.to_string().starts_with("Unable to update readarr_delay_profile"),
            "{err}"
        );
    }
}
