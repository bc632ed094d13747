//! Helpers for driving a provider without the gRPC layer.
//!
//! ```ignore
//! use readarr_provider::testing::ProviderTester;
//! use serde_json::json;
//!
//! let tester = ProviderTester::configured(&server.uri(), "key").await?;
//! let state = tester
//!     .lifecycle_create("readarr_tag", json!({"label": "books"}))
//!     .await?;
//! assert_eq!(state["label"], "books");
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::error::ProviderError;
use crate::provider::ReadarrProvider;
use crate::schema::{Diagnostic, ProviderSchema};
use crate::server::ProviderService;
use crate::types::{ImportedResource, PlanResult};

/// Failure of a tester call.
#[derive(Debug, Error)]
pub enum TestError {
    /// The call returned error diagnostics.
    #[error("{} error diagnostic(s): {}", .0.len(), summarize(.0))]
    Diagnostics(Vec<Diagnostic>),

    /// The call failed outright.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

fn summarize(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| match (&d.attribute, &d.detail) {
            (Some(attr), Some(detail)) => format!("{} ({attr}): {detail}", d.summary),
            (None, Some(detail)) => format!("{}: {detail}", d.summary),
            (Some(attr), None) => format!("{} ({attr})", d.summary),
            (None, None) => d.summary.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn check(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics.into_iter().filter(Diagnostic::is_error).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

/// Wraps a [`ProviderService`] with plan/apply helpers.
pub struct ProviderTester<P: ProviderService = ReadarrProvider> {
    provider: P,
}

impl ProviderTester<ReadarrProvider> {
    /// A Readarr provider configured against `url`.
    pub async fn configured(url: &str, api_key: &str) -> Result<Self, TestError> {
        let tester = Self::new(ReadarrProvider::new());
        tester
            .configure(serde_json::json!({"url": url, "api_key": api_key}))
            .await?;
        Ok(tester)
    }
}

impl<P: ProviderService> ProviderTester<P> {
    /// Wrap `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The provider schema.
    pub fn schema(&self) -> ProviderSchema {
        self.provider.schema()
    }

    /// Configure the provider, failing on error diagnostics.
    pub async fn configure(&self, config: Value) -> Result<(), TestError> {
        check(self.provider.configure(config).await?)
    }

    /// Validate a resource configuration, failing on error diagnostics.
    pub async fn validate_resource_config(
        &self,
        resource_type: &str,
        config: Value,
    ) -> Result<(), TestError> {
        check(
            self.provider
                .validate_resource_config(resource_type, config)
                .await?,
        )
    }

    /// Plan creating a resource from `config`.
    pub async fn plan_create(&self, resource_type: &str, config: Value) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, None, config.clone(), config)
            .await
    }

    /// Plan moving `prior` to `config`.
    pub async fn plan_update(
        &self,
        resource_type: &str,
        prior: Value,
        config: Value,
    ) -> Result<PlanResult, ProviderError> {
        self.provider
            .plan(resource_type, Some(prior), config.clone(), config)
            .await
    }

    /// Create a resource from a planned state.
    pub async fn create(&self, resource_type: &str, planned: Value) -> Result<Value, ProviderError> {
        self.provider.create(resource_type, planned).await
    }

    /// Refresh a resource.
    pub async fn read(&self, resource_type: &str, state: Value) -> Result<Value, ProviderError> {
        self.provider.read(resource_type, state).await
    }

    /// Apply a planned state over `prior`.
    pub async fn update(
        &self,
        resource_type: &str,
        prior: Value,
        planned: Value,
    ) -> Result<Value, ProviderError> {
        self.provider.update(resource_type, prior, planned).await
    }

    /// Delete a resource.
    pub async fn delete(&self, resource_type: &str, state: Value) -> Result<(), ProviderError> {
        self.provider.delete(resource_type, state).await
    }

    /// Import a resource by id.
    pub async fn import(&self, resource_type: &str, id: &str) -> Result<Vec<ImportedResource>, ProviderError> {
        self.provider.import_resource(resource_type, id).await
    }

    /// Read a data source.
    pub async fn read_data_source(
        &self,
        data_source_type: &str,
        config: Value,
    ) -> Result<Value, ProviderError> {
        self.provider.read_data_source(data_source_type, config).await
    }

    /// Validate, plan and create, returning the created state.
    pub async fn lifecycle_create(&self, resource_type: &str, config: Value) -> Result<Value, TestError> {
        self.validate_resource_config(resource_type, config.clone())
            .await?;
        let plan = self.plan_create(resource_type, config).await?;
        Ok(self.create(resource_type, plan.planned_state).await?)
    }

    /// Validate, plan and update, returning the updated state.
    pub async fn lifecycle_update(
        &self,
        resource_type: &str,
        prior: Value,
        config: Value,
    ) -> Result<Value, TestError> {
        self.validate_resource_config(resource_type, config.clone())
            .await?;
        let plan = self
            .plan_update(resource_type, prior.clone(), config)
            .await?;
        Ok(self.update(resource_type, prior, plan.planned_state).await?)
    }
}

/// Panics unless the plan creates something.
pub fn assert_plan_creates(plan: &PlanResult) {
    assert!(plan.has_changes(), "expected a create, got no changes");
    assert!(
        plan.changes.iter().all(|c| c.before.is_none()),
        "expected a create, got changes to existing values: {:?}",
        plan.changes
    );
}

/// Panics unless `path` is among the plan's changes.
pub fn assert_plan_changes_attribute(plan: &PlanResult, path: &str) {
    assert!(
        plan.changes.iter().any(|c| c.path == path),
        "expected a change to {path}, got {:?}",
        plan.changes.iter().map(|c| &c.path).collect::<Vec<_>>()
    );
}

/// Panics if the plan changes anything.
pub fn assert_plan_no_changes(plan: &PlanResult) {
    assert!(!plan.has_changes(), "expected no changes, got {:?}", plan.changes);
}

/// Panics unless some error diagnostic mentions `needle`.
pub fn assert_error_contains(diagnostics: &[Diagnostic], needle: &str) {
    assert!(
        diagnostics.iter().filter(|d| d.is_error()).any(|d| {
            d.summary.contains(needle) || d.detail.as_deref().is_some_and(|s| s.contains(needle))
        }),
        "no error diagnostic contains {needle:?}: {diagnostics:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeChange;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = TestError::Diagnostics(vec![
            Diagnostic::error("Unable to find URL")
                .with_detail("URL cannot be an empty string")
                .with_attribute("url"),
            Diagnostic::error("Unable to find API key"),
        ]);
        assert_eq!(
            err.to_string(),
            "2 error diagnostic(s): Unable to find URL (url): URL cannot be an empty string; Unable to find API key"
        );
    }

    #[test]
    fn test_check_ignores_warnings() {
        assert!(check(vec![Diagnostic::warning("deprecated")]).is_ok());
        assert!(check(vec![Diagnostic::error("broken")]).is_err());
    }

    #[test]
    fn test_plan_assertions() {
        let plan = PlanResult {
            planned_state: json!({"label": "books"}),
            changes: vec![AttributeChange::new("label", None, Some(json!("books")))],
            requires_replace: false,
        };
        assert_plan_creates(&plan);
        assert_plan_changes_attribute(&plan, "label");
    }

    #[test]
    #[should_panic(expected = "expected no changes")]
    fn test_assert_no_changes_panics() {
        let plan = PlanResult {
            planned_state: json!({}),
            changes: vec![AttributeChange::new("id", Some(json!(1)), Some(json!(2)))],
            requires_replace: false,
        };
        assert_plan_no_changes(&plan);
    }

    #[test]
    fn test_assert_error_contains() {
        let diags = vec![Diagnostic::error("Client Error").with_detail("401 Unauthorized")];
        assert_error_contains(&diags, "Unauthorized");
    }

    #[tokio::test]
    async fn test_configure_reports_diagnostics() {
        let tester = ProviderTester::new(ReadarrProvider::new());
        let err = tester
            .configure(json!({"url": "::", "api_key": "key"}))
            .await
            .unwrap_err();
        assert!(matches!(err, TestError::Diagnostics(ref d) if d[0].summary == "Invalid URL"));
    }
}
