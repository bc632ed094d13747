//! Reading and writing the `fields` array of Readarr DTOs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::client::models::Field;

/// What Readarr returns in place of a stored secret.
pub const SENSITIVE_MASK: &str = "********";

/// Builds a `fields` array from optional model values. Null values are skipped.
#[derive(Debug, Default)]
pub struct FieldWriter {
    fields: Vec<Field>,
}

impl FieldWriter {
    /// Start an empty field list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name` if `value` is set.
    pub fn set<T: Serialize>(mut self, name: &str, value: &Option<T>) -> Self {
        if let Some(json) = value.as_ref().and_then(|v| serde_json::to_value(v).ok()) {
            self.fields.push(Field::new(name, json));
        }
        self
    }

    /// The finished field list.
    pub fn finish(self) -> Vec<Field> {
        self.fields
    }
}

/// Looks up typed values in a `fields` array.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    fields: &'a [Field],
}

impl<'a> FieldReader<'a> {
    /// Wrap a field list.
    pub fn new(fields: &'a [Field]) -> Self {
        Self { fields }
    }

    fn raw(&self, name: &str) -> Option<&'a Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(|f| f.value.as_ref())
            .filter(|v| !v.is_null())
    }

    /// The value of `name`, or None when absent or of another type.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        self.raw(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// A secret field: masked or missing values keep `current`.
    pub fn sensitive(&self, name: &str, current: Option<String>) -> Option<String> {
        match self.get::<String>(name) {
            Some(value) if value != SENSITIVE_MASK => Some(value),
            _ => current,
        }
    }
}
