//! Hemmer provider for [Readarr](https://readarr.com).
//!
//! Manages download clients, indexers, notifications, import lists, quality,
//! metadata, delay and release profiles, custom formats, root folders, tags,
//! remote path mappings and the naming and media management config of a
//! Readarr instance through its v1 REST API, and exposes them over the Hemmer
//! provider gRPC protocol.
//!
//! # Handshake
//!
//! Started by the engine, the binary binds a free localhost port and prints
//!
//! ```text
//! HEMMER_PROVIDER|1|127.0.0.1:50051
//! ```
//!
//! on stdout. Everything else, logs included, goes to stderr.
//!
//! # Layout
//!
//! - [`client`]: typed async Readarr API client
//! - [`resources`] and [`data_sources`]: per-type schemas and API mappings
//! - [`provider`]: dispatch by type name
//! - [`server`]: the gRPC service and handshake

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod logging;
pub mod plan;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod server;
pub mod testing;
pub mod types;
pub mod validation;

#[allow(missing_docs)]
#[allow(clippy::all)]
pub mod generated;

pub use client::{ClientError, ReadarrClient};
pub use error::{Operation, ProviderError};
pub use logging::{init_logging, init_logging_with_default};
pub use provider::ReadarrProvider;
pub use schema::ProviderSchema;
pub use server::{serve, serve_with_options, ProviderService, ServeOptions};
pub use types::{
    AttributeChange, ImportedResource, PlanResult, ProviderMetadata, ServerCapabilities,
    HANDSHAKE_PREFIX, PROTOCOL_VERSION,
};
