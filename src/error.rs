//! Error types for the Readarr provider.

use std::fmt;

use thiserror::Error;

use crate::client::ClientError;
use crate::schema::Diagnostic;

/// The category of API call that failed, as reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// POST of a new object.
    Create,
    /// GET of a single object.
    Read,
    /// PUT of an existing object.
    Update,
    /// DELETE of an object.
    Delete,
    /// GET of a collection.
    List,
    /// Initial read performed before a singleton is first written.
    Init,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Init => "init",
        })
    }
}

/// Errors that can occur while serving a provider request.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A Readarr API call failed.
    #[error("Unable to {operation} {resource}, got error: {source}")]
    Client {
        /// Which kind of call failed.
        operation: Operation,
        /// Resource or data source name, e.g. `readarr_tag`.
        resource: String,
        /// The underlying client error.
        source: ClientError,
    },

    /// A data source lookup matched nothing.
    #[error("Unable to find {kind}, got error: data source not found: no {kind} with {field} '{value}'")]
    DataSourceNotFound {
        /// Data source name.
        kind: String,
        /// The attribute used for the lookup.
        field: String,
        /// The value that was searched for.
        value: String,
    },

    /// The identifier passed to import is not a numeric id.
    #[error("Expected import identifier with format: ID. Got: {0:?}")]
    ImportIdentifier(String),

    /// The provider has not been configured, or was configured badly.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested resource or data source type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A state or config value did not match the expected model.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError {
    /// Wrap a client error with the failing operation and resource name.
    pub fn client(operation: Operation, resource: impl Into<String>, source: ClientError) -> Self {
        Self::Client {
            operation,
            resource: resource.into(),
            source,
        }
    }

    /// Build a not-found error for a data source lookup.
    pub fn not_found(
        kind: impl Into<String>,
        field: impl Into<String>,
        value: impl fmt::Display,
    ) -> Self {
        Self::DataSourceNotFound {
            kind: kind.into(),
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Short summary used as the diagnostic headline.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Client { .. } => "Client Error",
            Self::DataSourceNotFound { .. } => "Data Source Error",
            Self::ImportIdentifier(_) => "Unexpected Import Identifier",
            Self::Configuration(_) => "Provider Not Configured",
            Self::UnknownResource(_) => "Unknown Resource Type",
            Self::Serialization(_) => "Invalid Value",
        }
    }

    /// Convert to the error diagnostic returned to the engine.
    pub fn diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.summary()).with_detail(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiagnosticSeverity;

    #[test]
    fn test_client_error_display() {
        let err = ProviderError::client(
            Operation::Read,
            "readarr_tag",
            ClientError::Status {
                status: reqwest::StatusCode::UNAUTHORIZED,
                message: "Unauthorized".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Unable to read readarr_tag, got error: 401 Unauthorized: Unauthorized"
        );

        let diag = err.diagnostic();
        assert_eq!(diag.severity, DiagnosticSeverity::Error);
        assert_eq!(diag.summary, "Client Error");
    }

    #[test]
    fn test_not_found_display() {
        let err = ProviderError::not_found("readarr_tag", "label", "missing");
        assert_eq!(
            err.to_string(),
            "Unable to find readarr_tag, got error: data source not found: no readarr_tag with label 'missing'"
        );
        assert_eq!(err.diagnostic().summary, "Data Source Error");
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "create");
        assert_eq!(Operation::List.to_string(), "list");
        assert_eq!(Operation::Init.to_string(), "init");
    }

    #[test]
    fn test_import_identifier() {
        let err = ProviderError::ImportIdentifier("abc".to_string());
        assert_eq!(err.summary(), "Unexpected Import Identifier");
        assert!(err.to_string().contains("\"abc\""));
    }
}
