//! Provider configuration.
//!
//! The provider block accepts `url` and `api_key`; either may be omitted
//! and taken from `READARR_URL` / `READARR_API_KEY` instead.

use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

use crate::error::ProviderError;
use crate::schema::{Attribute, Diagnostic, Schema};

/// Environment variable holding the Readarr base URL.
pub const URL_ENV: &str = "READARR_URL";

/// Environment variable holding the Readarr API key.
pub const API_KEY_ENV: &str = "READARR_API_KEY";

/// The provider block as written by the user.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Full Readarr URL, e.g. `http://localhost:8787`.
    pub url: Option<String>,
    /// API key from Readarr's general settings.
    pub api_key: Option<String>,
}

/// Configuration after environment fallback, ready to build a client.
#[derive(Debug)]
pub struct ResolvedConfig {
    /// Parsed base URL.
    pub url: Url,
    /// API key, redacted from debug output.
    pub api_key: SecretString,
}

impl ProviderConfig {
    /// The schema of the provider block.
    pub fn schema() -> Schema {
        Schema::v0()
            .with_description("Interact with Readarr.")
            .with_attribute(
                "api_key",
                Attribute::optional_string()
                    .sensitive()
                    .with_description(format!(
                        "API key for Readarr authentication. Can be specified via the {} environment variable.",
                        API_KEY_ENV
                    )),
            )
            .with_attribute(
                "url",
                Attribute::optional_string().with_description(format!(
                    "Full Readarr URL with protocol and port (e.g. `https://test.readarr.tv:8787`). Can be specified via the {} environment variable.",
                    URL_ENV
                )),
            )
    }

    /// Parse the provider block. A null block is treated as empty.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ProviderError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Apply environment fallback and check the result.
    pub fn resolve(self) -> Result<ResolvedConfig, Vec<Diagnostic>> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Like [`ProviderConfig::resolve`], reading the environment through `env`.
    pub fn resolve_with(
        self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<ResolvedConfig, Vec<Diagnostic>> {
        // The environment only fills in unset values. An explicit empty
        // string is reported as such.
        let url = self.url.or_else(|| env(URL_ENV)).unwrap_or_default();
        let api_key = self
            .api_key
            .or_else(|| env(API_KEY_ENV))
            .unwrap_or_default();

        let mut diagnostics = Vec::new();

        if url.is_empty() {
            diagnostics.push(
                Diagnostic::error("Unable to find URL")
                    .with_detail("URL cannot be an empty string")
                    .with_attribute("url"),
            );
        }
        if api_key.is_empty() {
            diagnostics.push(
                Diagnostic::error("Unable to find API key")
                    .with_detail("API key cannot be an empty string")
                    .with_attribute("api_key"),
            );
        }

        let parsed = if url.is_empty() {
            None
        } else {
            match Url::parse(&url) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    diagnostics.push(
                        Diagnostic::error("Invalid URL")
                            .with_detail(format!("Unable to parse URL {:?}: {}", url, e))
                            .with_attribute("url"),
                    );
                    None
                }
            }
        };

        match parsed {
            Some(url) if diagnostics.is_empty() => Ok(ResolvedConfig {
                url,
                api_key: SecretString::from(api_key),
            }),
            _ => Err(diagnostics),
        }
    }
}
