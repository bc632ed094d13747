//! gRPC server for the provider protocol.
//!
//! [`ProviderService`] is the typed interface the provider implements;
//! [`serve`] wraps it in the generated tonic service, prints the handshake
//! line and runs until SIGTERM or SIGINT.
//!
//! Provider errors never become gRPC status failures. Every RPC answers
//! with a response whose `diagnostics` carry the error, so the engine can
//! show it next to the offending resource.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::{debug, error, info, instrument, warn};

use crate::error::ProviderError;
use crate::generated as pb;
use crate::schema::{Diagnostic, DiagnosticSeverity, ProviderSchema};
use crate::types::{
    ImportedResource, PlanResult, ProviderMetadata, HANDSHAKE_PREFIX, PROTOCOL_VERSION,
};

/// The typed provider interface behind the gRPC service.
///
/// State, plans and configuration are JSON values. Methods with a default
/// are optional for providers that have nothing to check or migrate.
#[async_trait::async_trait]
pub trait ProviderService: Send + Sync + 'static {
    /// Schemas of the provider block, resources and data sources.
    fn schema(&self) -> ProviderSchema;

    /// Resource and data source names, derived from the schema.
    fn metadata(&self) -> ProviderMetadata {
        let schema = self.schema();
        ProviderMetadata {
            resources: schema.resources.keys().cloned().collect(),
            data_sources: schema.data_sources.keys().cloned().collect(),
            capabilities: Default::default(),
        }
    }

    /// Check the provider block before configuring.
    async fn validate_provider_config(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = config;
        Ok(vec![])
    }

    /// Configure the provider. Error diagnostics leave it unconfigured.
    async fn configure(&self, config: Value) -> Result<Vec<Diagnostic>, ProviderError>;

    /// Release resources held by the provider.
    async fn stop(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Check a resource configuration before planning.
    async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = (resource_type, config);
        Ok(vec![])
    }

    /// Migrate state written by an older schema version.
    async fn upgrade_resource_state(
        &self,
        resource_type: &str,
        version: i64,
        state: Value,
    ) -> Result<Value, ProviderError> {
        let _ = (resource_type, version);
        Ok(state)
    }

    /// Compute the planned state. `prior_state` is `None` on create.
    async fn plan(
        &self,
        resource_type: &str,
        prior_state: Option<Value>,
        proposed_state: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError>;

    /// Create a resource and return its state.
    async fn create(&self, resource_type: &str, planned_state: Value) -> Result<Value, ProviderError>;

    /// Refresh a resource's state.
    async fn read(&self, resource_type: &str, current_state: Value) -> Result<Value, ProviderError>;

    /// Apply a planned change to an existing resource.
    async fn update(
        &self,
        resource_type: &str,
        prior_state: Value,
        planned_state: Value,
    ) -> Result<Value, ProviderError>;

    /// Delete a resource.
    async fn delete(&self, resource_type: &str, current_state: Value) -> Result<(), ProviderError>;

    /// Import an existing object by its identifier.
    async fn import_resource(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<Vec<ImportedResource>, ProviderError> {
        let _ = id;
        Err(ProviderError::UnknownResource(resource_type.to_string()))
    }

    /// Check a data source configuration.
    async fn validate_data_source_config(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Vec<Diagnostic>, ProviderError> {
        let _ = (data_source_type, config);
        Ok(vec![])
    }

    /// Read a data source.
    async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError>;
}

impl From<Diagnostic> for pb::Diagnostic {
    fn from(d: Diagnostic) -> Self {
        let severity = match d.severity {
            DiagnosticSeverity::Error => pb::diagnostic::Severity::Error,
            DiagnosticSeverity::Warning => pb::diagnostic::Severity::Warning,
        };
        Self {
            severity: severity as i32,
            summary: d.summary,
            detail: d.detail.unwrap_or_default(),
            attribute: d.attribute.unwrap_or_default(),
        }
    }
}

impl From<&crate::schema::Schema> for pb::Schema {
    fn from(schema: &crate::schema::Schema) -> Self {
        let block = &schema.block;
        let attributes = block
            .attributes
            .iter()
            .map(|(name, attr)| pb::Attribute {
                name: name.clone(),
                r#type: serde_json::to_vec(&attr.attr_type).unwrap_or_default(),
                required: attr.flags.required,
                optional: attr.flags.optional,
                computed: attr.flags.computed,
                sensitive: attr.flags.sensitive,
                description: attr.description.clone().unwrap_or_default(),
                force_new: attr.force_new,
                default_value: attr.default.as_ref().map(encode).unwrap_or_default(),
            })
            .collect();

        Self {
            version: schema.version as i64,
            block: Some(pb::Block {
                attributes,
                block_types: vec![],
                description: block.description.clone().unwrap_or_default(),
            }),
        }
    }
}

/// Decode a JSON payload. Empty or malformed payloads are null.
fn decode(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}

fn encode(value: &Value) -> Vec<u8> {
    serde_json::to_vec(value).unwrap_or_default()
}

fn error_diagnostics(err: &ProviderError) -> Vec<pb::Diagnostic> {
    vec![err.diagnostic().into()]
}

/// Log the outcome of a validation-style RPC and convert its diagnostics.
fn diagnostics_response(
    rpc: &str,
    object: &str,
    result: Result<Vec<Diagnostic>, ProviderError>,
) -> Vec<pb::Diagnostic> {
    match result {
        Ok(diagnostics) => {
            if diagnostics.iter().any(Diagnostic::is_error) {
                warn!(object, diagnostics = diagnostics.len(), "{rpc} returned errors");
            } else {
                debug!(object, "{rpc} completed");
            }
            diagnostics.into_iter().map(Into::into).collect()
        }
        Err(e) => {
            error!(object, error = %e, "{rpc} failed");
            error_diagnostics(&e)
        }
    }
}

/// Log a failed state-returning RPC and return its diagnostics.
fn failure(rpc: &str, object: &str, err: &ProviderError) -> Vec<pb::Diagnostic> {
    error!(object, error = %err, "{rpc} failed");
    error_diagnostics(err)
}

struct GrpcProvider<P> {
    provider: Arc<P>,
}

#[tonic::async_trait]
impl<P: ProviderService> pb::provider_server::Provider for GrpcProvider<P> {
    #[instrument(skip_all, name = "grpc.get_metadata")]
    async fn get_metadata(
        &self,
        _request: Request<pb::GetMetadataRequest>,
    ) -> Result<Response<pb::GetMetadataResponse>, Status> {
        let metadata = self.provider.metadata();
        debug!(
            resources = metadata.resources.len(),
            data_sources = metadata.data_sources.len(),
            "GetMetadata completed"
        );
        Ok(Response::new(pb::GetMetadataResponse {
            server_capabilities: Some(pb::ServerCapabilities {
                plan_destroy: metadata.capabilities.plan_destroy,
            }),
            resources: metadata.resources,
            data_sources: metadata.data_sources,
            diagnostics: vec![],
        }))
    }

    #[instrument(skip_all, name = "grpc.get_schema")]
    async fn get_schema(
        &self,
        _request: Request<pb::GetSchemaRequest>,
    ) -> Result<Response<pb::GetSchemaResponse>, Status> {
        let schema = self.provider.schema();
        Ok(Response::new(pb::GetSchemaResponse {
            provider: Some((&schema.provider).into()),
            resources: schema
                .resources
                .iter()
                .map(|(name, s)| (name.clone(), pb::Schema::from(s)))
                .collect(),
            data_sources: schema
                .data_sources
                .iter()
                .map(|(name, s)| (name.clone(), pb::Schema::from(s)))
                .collect(),
            diagnostics: vec![],
        }))
    }

    #[instrument(skip_all, name = "grpc.validate_provider_config")]
    async fn validate_provider_config(
        &self,
        request: Request<pb::ValidateProviderConfigRequest>,
    ) -> Result<Response<pb::ValidateProviderConfigResponse>, Status> {
        let config = decode(&request.into_inner().config);
        let result = self.provider.validate_provider_config(config).await;
        Ok(Response::new(pb::ValidateProviderConfigResponse {
            diagnostics: diagnostics_response("ValidateProviderConfig", "provider", result),
        }))
    }

    #[instrument(skip_all, name = "grpc.configure")]
    async fn configure(
        &self,
        request: Request<pb::ConfigureRequest>,
    ) -> Result<Response<pb::ConfigureResponse>, Status> {
        let config = decode(&request.into_inner().config);
        let result = self.provider.configure(config).await;
        Ok(Response::new(pb::ConfigureResponse {
            diagnostics: diagnostics_response("Configure", "provider", result),
        }))
    }

    #[instrument(skip_all, name = "grpc.stop")]
    async fn stop(
        &self,
        _request: Request<pb::StopRequest>,
    ) -> Result<Response<pb::StopResponse>, Status> {
        let error = match self.provider.stop().await {
            Ok(()) => String::new(),
            Err(e) => {
                error!(error = %e, "Stop failed");
                e.to_string()
            }
        };
        Ok(Response::new(pb::StopResponse { error }))
    }

    #[instrument(skip_all, name = "grpc.validate_resource_config", fields(resource_type = %request.get_ref().resource_type))]
    async fn validate_resource_config(
        &self,
        request: Request<pb::ValidateResourceConfigRequest>,
    ) -> Result<Response<pb::ValidateResourceConfigResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .provider
            .validate_resource_config(&req.resource_type, decode(&req.config))
            .await;
        Ok(Response::new(pb::ValidateResourceConfigResponse {
            diagnostics: diagnostics_response("ValidateResourceConfig", &req.resource_type, result),
        }))
    }

    #[instrument(skip_all, name = "grpc.upgrade_resource_state", fields(resource_type = %request.get_ref().resource_type))]
    async fn upgrade_resource_state(
        &self,
        request: Request<pb::UpgradeResourceStateRequest>,
    ) -> Result<Response<pb::UpgradeResourceStateResponse>, Status> {
        let req = request.into_inner();

        let response = match self
            .provider
            .upgrade_resource_state(&req.resource_type, req.version, decode(&req.raw_state))
            .await
        {
            Ok(state) => pb::UpgradeResourceStateResponse {
                upgraded_state: encode(&state),
                diagnostics: vec![],
            },
            Err(e) => pb::UpgradeResourceStateResponse {
                upgraded_state: vec![],
                diagnostics: failure("UpgradeResourceState", &req.resource_type, &e),
            },
        };
        Ok(Response::new(response))
    }

    #[instrument(skip_all, name = "grpc.plan", fields(resource_type = %request.get_ref().resource_type))]
    async fn plan(
        &self,
        request: Request<pb::PlanRequest>,
    ) -> Result<Response<pb::PlanResponse>, Status> {
        let req = request.into_inner();

        let prior = (!req.prior_state.is_empty())
            .then(|| decode(&req.prior_state))
            .filter(|v| !v.is_null());

        let response = match self
            .provider
            .plan(
                &req.resource_type,
                prior,
                decode(&req.proposed_state),
                decode(&req.config),
            )
            .await
        {
            Ok(result) => {
                debug!(
                    changes = result.changes.len(),
                    requires_replace = result.requires_replace,
                    "Plan completed"
                );
                pb::PlanResponse {
                    planned_state: encode(&result.planned_state),
                    changes: result.changes.into_iter().map(Into::into).collect(),
                    requires_replace: result.requires_replace,
                    diagnostics: vec![],
                }
            }
            Err(e) => pb::PlanResponse {
                planned_state: vec![],
                changes: vec![],
                requires_replace: false,
                diagnostics: failure("Plan", &req.resource_type, &e),
            },
        };
        Ok(Response::new(response))
    }

    #[instrument(skip_all, name = "grpc.create", fields(resource_type = %request.get_ref().resource_type))]
    async fn create(
        &self,
        request: Request<pb::CreateRequest>,
    ) -> Result<Response<pb::CreateResponse>, Status> {
        let req = request.into_inner();

        let response = match self
            .provider
            .create(&req.resource_type, decode(&req.planned_state))
            .await
        {
            Ok(state) => {
                info!(resource_type = %req.resource_type, "Create completed");
                pb::CreateResponse {
                    state: encode(&state),
                    diagnostics: vec![],
                }
            }
            Err(e) => pb::CreateResponse {
                state: vec![],
                diagnostics: failure("Create", &req.resource_type, &e),
            },
        };
        Ok(Response::new(response))
    }

    #[instrument(skip_all, name = "grpc.read", fields(resource_type = %request.get_ref().resource_type))]
    async fn read(
        &self,
        request: Request<pb::ReadRequest>,
    ) -> Result<Response<pb::ReadResponse>, Status> {
        let req = request.into_inner();

        let response = match self
            .provider
            .read(&req.resource_type, decode(&req.current_state))
            .await
        {
            Ok(state) => pb::ReadResponse {
                state: encode(&state),
                diagnostics: vec![],
            },
            Err(e) => pb::ReadResponse {
                state: vec![],
                diagnostics: failure("Read", &req.resource_type, &e),
            },
        };
        Ok(Response::new(response))
    }

    #[instrument(skip_all, name = "grpc.update", fields(resource_type = %request.get_ref().resource_type))]
    async fn update(
        &self,
        request: Request<pb::UpdateRequest>,
    ) -> Result<Response<pb::UpdateResponse>, Status> {
        let req = request.into_inner();

        let response = match self
            .provider
            .update(
                &req.resource_type,
                decode(&req.prior_state),
                decode(&req.planned_state),
            )
            .await
        {
            Ok(state) => {
                info!(resource_type = %req.resource_type, "Update completed");
                pb::UpdateResponse {
                    state: encode(&state),
                    diagnostics: vec![],
                }
            }
            Err(e) => pb::UpdateResponse {
                state: vec![],
                diagnostics: failure("Update", &req.resource_type, &e),
            },
        };
        Ok(Response::new(response))
    }

    #[instrument(skip_all, name = "grpc.delete", fields(resource_type = %request.get_ref().resource_type))]
    async fn delete(
        &self,
        request: Request<pb::DeleteRequest>,
    ) -> Result<Response<pb::DeleteResponse>, Status> {
        let req = request.into_inner();

        let diagnostics = match self
            .provider
            .delete(&req.resource_type, decode(&req.current_state))
            .await
        {
            Ok(()) => {
                info!(resource_type = %req.resource_type, "Delete completed");
                vec![]
            }
            Err(e) => failure("Delete", &req.resource_type, &e),
        };
        Ok(Response::new(pb::DeleteResponse { diagnostics }))
    }

    #[instrument(skip_all, name = "grpc.import_resource_state", fields(resource_type = %request.get_ref().resource_type, id = %request.get_ref().id))]
    async fn import_resource_state(
        &self,
        request: Request<pb::ImportResourceStateRequest>,
    ) -> Result<Response<pb::ImportResourceStateResponse>, Status> {
        let req = request.into_inner();

        let response = match self
            .provider
            .import_resource(&req.resource_type, &req.id)
            .await
        {
            Ok(imported) => pb::ImportResourceStateResponse {
                imported: imported
                    .into_iter()
                    .map(|r| pb::ImportedResource {
                        state: encode(&r.state),
                        resource_type: r.resource_type,
                    })
                    .collect(),
                diagnostics: vec![],
            },
            Err(e) => pb::ImportResourceStateResponse {
                imported: vec![],
                diagnostics: failure("ImportResourceState", &req.resource_type, &e),
            },
        };
        Ok(Response::new(response))
    }

    #[instrument(skip_all, name = "grpc.validate_data_source_config", fields(data_source_type = %request.get_ref().data_source_type))]
    async fn validate_data_source_config(
        &self,
        request: Request<pb::ValidateDataSourceConfigRequest>,
    ) -> Result<Response<pb::ValidateDataSourceConfigResponse>, Status> {
        let req = request.into_inner();

        let result = self
            .provider
            .validate_data_source_config(&req.data_source_type, decode(&req.config))
            .await;
        Ok(Response::new(pb::ValidateDataSourceConfigResponse {
            diagnostics: diagnostics_response(
                "ValidateDataSourceConfig",
                &req.data_source_type,
                result,
            ),
        }))
    }

    #[instrument(skip_all, name = "grpc.read_data_source", fields(data_source_type = %request.get_ref().data_source_type))]
    async fn read_data_source(
        &self,
        request: Request<pb::ReadDataSourceRequest>,
    ) -> Result<Response<pb::ReadDataSourceResponse>, Status> {
        let req = request.into_inner();

        let response = match self
            .provider
            .read_data_source(&req.data_source_type, decode(&req.config))
            .await
        {
            Ok(state) => pb::ReadDataSourceResponse {
                state: encode(&state),
                diagnostics: vec![],
            },
            Err(e) => pb::ReadDataSourceResponse {
                state: vec![],
                diagnostics: failure("ReadDataSource", &req.data_source_type, &e),
            },
        };
        Ok(Response::new(response))
    }
}

/// Server options.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_timeout: Duration,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl ServeOptions {
    /// Options with a 30 second shutdown timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

/// Resolves on SIGTERM or SIGINT (CTRL+C off Unix). Never resolves if the
/// handlers cannot be installed.
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
                    _ = sigint.recv() => info!("Received SIGINT, shutting down"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Unable to install signal handlers");
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received CTRL+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Unable to install CTRL+C handler");
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Serve `provider` on a free localhost port.
///
/// Prints `HEMMER_PROVIDER|<version>|<address>` on stdout once the listener
/// is bound; the engine reads that line to connect.
pub async fn serve<P: ProviderService>(provider: P) -> Result<(), Box<dyn std::error::Error>> {
    serve_with_options(provider, ServeOptions::default()).await
}

/// [`serve`] with explicit options.
pub async fn serve_with_options<P: ProviderService>(
    provider: P,
    options: ServeOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    println!("{}", handshake(addr));
    info!(address = %addr, "Provider server starting");

    let provider = Arc::new(provider);
    let service = pb::provider_server::ProviderServer::new(GrpcProvider {
        provider: Arc::clone(&provider),
    });

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let server = Server::builder().add_service(service).serve_with_incoming_shutdown(
        tokio_stream::wrappers::TcpListenerStream::new(listener),
        async move {
            wait_for_shutdown_signal().await;
            let _ = signalled_tx.send(());
        },
    );
    tokio::pin!(server);

    // The timeout only bounds the drain after a signal, not the server's lifetime.
    tokio::select! {
        result = &mut server => result?,
        Ok(()) = signalled_rx => {
            match tokio::time::timeout(options.shutdown_timeout, &mut server).await {
                Ok(result) => result?,
                Err(_) => warn!(
                    timeout = ?options.shutdown_timeout,
                    "Shutdown timeout exceeded, dropping in-flight requests"
                ),
            }
        }
    }

    if let Err(e) = provider.stop().await {
        warn!(error = %e, "Provider stop failed");
    }

    info!("Provider shutdown complete");
    Ok(())
}

/// The handshake line announcing `addr` to the engine.
pub fn handshake(addr: SocketAddr) -> String {
    format!("{HANDSHAKE_PREFIX}|{PROTOCOL_VERSION}|{addr}")
}
