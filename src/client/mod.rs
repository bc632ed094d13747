// Async HTTP client for the Readarr v1 API.
//
// Base path: {url}/api/v1/
// Auth: X-Api-Key header

pub mod models;

use std::marker::PhantomData;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

use models::{
    CustomFormatResource, DelayProfileResource, DownloadClientResource, ImportListResource,
    IndexerResource, MediaManagementConfigResource, MetadataProfileResource,
    NamingConfigResource, NotificationResource, QualityProfileResource, ReleaseProfileResource,
    RemotePathMappingResource, RootFolderResource, TagResource,
};

/// Errors returned by [`ReadarrClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response body not read.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// A request path could not be joined onto the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The API key contains characters not allowed in a header.
    #[error("invalid API key header value")]
    InvalidApiKey,

    /// Readarr answered with a non-success status.
    #[error("{status}: {message}")]
    Status {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Error message from the body, or the status reason.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Deserialization {
        /// Decoder error with a preview of the body.
        message: String,
    },
}

impl ClientError {
    /// Whether the API reported the object as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

// Readarr validation failures come back as an array of these; other errors
// carry a single `message`.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

/// Async client for the Readarr API.
#[derive(Debug, Clone)]
pub struct ReadarrClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ReadarrClient {
    /// Build a client for the Readarr instance at `url`.
    ///
    /// Injects `X-Api-Key` as a default header on every request.
    pub fn new(url: &Url, api_key: &SecretString) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| ClientError::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert("X-Api-Key", key_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("readarr-provider/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: Self::normalize_base_url(url),
        })
    }

    /// `http://host:8787/readarr` becomes `http://host:8787/readarr/api/v1/`.
    fn normalize_base_url(url: &Url) -> Url {
        let mut base = url.clone();
        let path = base.path().trim_end_matches('/').to_owned();
        base.set_path(&format!("{path}/api/v1/"));
        base.set_query(None);
        base
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path)?)
    }

    // ── Typed endpoints ──────────────────────────────────────────────

    /// `/downloadclient`
    pub fn download_clients(&self) -> Endpoint<'_, DownloadClientResource> {
        Endpoint::new(self, "downloadclient")
    }

    /// `/indexer`
    pub fn indexers(&self) -> Endpoint<'_, IndexerResource> {
        Endpoint::new(self, "indexer")
    }

    /// `/notification`
    pub fn notifications(&self) -> Endpoint<'_, NotificationResource> {
        Endpoint::new(self, "notification")
    }

    /// `/delayprofile`
    pub fn delay_profiles(&self) -> Endpoint<'_, DelayProfileResource> {
        Endpoint::new(self, "delayprofile")
    }

    /// `/releaseprofile`
    pub fn release_profiles(&self) -> Endpoint<'_, ReleaseProfileResource> {
        Endpoint::new(self, "releaseprofile")
    }

    /// `/tag`
    pub fn tags(&self) -> Endpoint<'_, TagResource> {
        Endpoint::new(self, "tag")
    }

    /// `/remotepathmapping`
    pub fn remote_path_mappings(&self) -> Endpoint<'_, RemotePathMappingResource> {
        Endpoint::new(self, "remotepathmapping")
    }

    /// `/customformat`
    pub fn custom_formats(&self) -> Endpoint<'_, CustomFormatResource> {
        Endpoint::new(self, "customformat")
    }

    /// `/importlist`
    pub fn import_lists(&self) -> Endpoint<'_, ImportListResource> {
        Endpoint::new(self, "importlist")
    }

    /// `/qualityprofile`
    pub fn quality_profiles(&self) -> Endpoint<'_, QualityProfileResource> {
        Endpoint::new(self, "qualityprofile")
    }

    /// `/metadataprofile`
    pub fn metadata_profiles(&self) -> Endpoint<'_, MetadataProfileResource> {
        Endpoint::new(self, "metadataprofile")
    }

    /// `/rootfolder`
    pub fn root_folders(&self) -> Endpoint<'_, RootFolderResource> {
        Endpoint::new(self, "rootfolder")
    }

    /// `/config/naming`
    pub fn naming(&self) -> Settings<'_, NamingConfigResource> {
        Settings::new(self, "config/naming")
    }

    /// `/config/mediamanagement`
    pub fn media_management(&self) -> Settings<'_, MediaManagementConfigResource> {
        Settings::new(self, "config/mediamanagement")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(parse_error(status, resp).await)
        }
    }
}

/// CRUD access to one Readarr collection, e.g. `/api/v1/tag`.
pub struct Endpoint<'a, T> {
    client: &'a ReadarrClient,
    path: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Endpoint<'a, T>
where
    T: Serialize + DeserializeOwned + Sync,
{
    fn new(client: &'a ReadarrClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    /// GET the whole collection.
    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        self.client.get(self.path).await
    }

    /// GET one object by id.
    pub async fn get(&self, id: i64) -> Result<T, ClientError> {
        self.client.get(&format!("{}/{}", self.path, id)).await
    }

    /// POST a new object and return it as stored.
    pub async fn create(&self, body: &T) -> Result<T, ClientError> {
        self.client.post(self.path, body).await
    }

    /// PUT an existing object and return it as stored.
    pub async fn update(&self, id: i64, body: &T) -> Result<T, ClientError> {
        self.client
            .put(&format!("{}/{}", self.path, id), body)
            .await
    }

    /// DELETE an object by id.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.client.delete(&format!("{}/{}", self.path, id)).await
    }
}

/// A config singleton such as `/api/v1/config/naming`.
pub struct Settings<'a, T> {
    client: &'a ReadarrClient,
    path: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Settings<'a, T>
where
    T: Serialize + DeserializeOwned + Sync,
{
    fn new(client: &'a ReadarrClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _marker: PhantomData,
        }
    }

    /// GET the current settings.
    pub async fn get(&self) -> Result<T, ClientError> {
        self.client.get(self.path).await
    }

    /// PUT the settings stored under `id`.
    pub async fn update(&self, id: i64, body: &T) -> Result<T, ClientError> {
        self.client
            .put(&format!("{}/{}", self.path, id), body)
            .await
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }

    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        ClientError::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
        }
    })
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> ClientError {
    let raw = resp.text().await.unwrap_or_default();

    let from_body = serde_json::from_str::<ErrorResponse>(&raw)
        .ok()
        .and_then(|e| e.message)
        .or_else(|| {
            serde_json::from_str::<Vec<ErrorResponse>>(&raw)
                .ok()
                .map(|errors| {
                    errors
                        .into_iter()
                        .filter_map(|e| e.error_message)
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .filter(|m| !m.is_empty())
        });

    let message = from_body.unwrap_or_else(|| {
        if raw.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            raw
        }
    });

    ClientError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(uri: &str) -> ReadarrClient {
        let url = Url::parse(uri).unwrap();
        ReadarrClient::new(&url, &SecretString::from("test-key")).unwrap()
    }

    #[test]
    fn test_normalize_base_url() {
        let url = Url::parse("http://localhost:8787").unwrap();
        assert_eq!(
            ReadarrClient::normalize_base_url(&url).as_str(),
            "http://localhost:8787/api/v1/"
        );

        let url = Url::parse("http://host/readarr/?x=1").unwrap();
        assert_eq!(
            ReadarrClient::normalize_base_url(&url).as_str(),
            "http://host/readarr/api/v1/"
        );
    }

    #[tokio::test]
    async fn test_list_sends_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tag"))
            .and(header("X-Api-Key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "label": "books"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tags = client(&server.uri()).tags().list().await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].label, "books");
    }

    #[tokio::test]
    async fn test_update_puts_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/tag/4"))
            .and(body_partial_json(json!({"label": "audio"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": 4, "label": "audio"})))
            .mount(&server)
            .await;

        let body = TagResource {
            id: 4,
            label: "audio".to_string(),
        };
        let tag = client(&server.uri()).tags().update(4, &body).await.unwrap();
        assert_eq!(tag.id, 4);
    }

    #[tokio::test]
    async fn test_error_status_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tag/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "NotFound"})))
            .mount(&server)
            .await;

        let err = client(&server.uri()).tags().get(9).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "404 Not Found: NotFound");
    }

    #[tokio::test]
    async fn test_validation_errors_joined() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/tag"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!([
                {"propertyName": "Label", "errorMessage": "'Label' must not be empty."}
            ])))
            .mount(&server)
            .await;

        let body = TagResource::default();
        let err = client(&server.uri()).tags().create(&body).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "400 Bad Request: 'Label' must not be empty."
        );
    }

    #[tokio::test]
    async fn test_unauthorized_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/config/naming"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server.uri()).naming().get().await.unwrap_err();
        assert_eq!(err.to_string(), "401 Unauthorized: Unauthorized");
    }

    #[tokio::test]
    async fn test_bad_body_is_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/tag"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&server.uri()).tags().list().await.unwrap_err();
        assert!(matches!(err, ClientError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/delayprofile/2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server.uri())
            .delay_profiles()
            .delete(2)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_settings_put_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/config/mediamanagement/1"))
            .and(body_partial_json(json!({"id": 1, "recycleBin": "/trash"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "id": 1, "recycleBin": "/trash", "recycleBinCleanupDays": 7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let body = MediaManagementConfigResource {
            id: 1,
            recycle_bin: "/trash".to_string(),
            ..Default::default()
        };
        let config = client(&server.uri())
            .media_management()
            .update(1, &body)
            .await
            .unwrap();
        assert_eq!(config.recycle_bin_cleanup_days, 7);
    }
}
