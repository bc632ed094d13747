//! Metadata profiles.

use serde::{Deserialize, Serialize};

use super::ResourceModel;
use crate::client::models::MetadataProfileResource;
use crate::client::{Endpoint, ReadarrClient};
use crate::schema::{Attribute, Schema};

/// Filters applied to the books Readarr adds for an author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataProfile {
    /// Metadata Profile ID.
    pub id: Option<i64>,
    /// Unique name.
    pub name: Option<String>,
    /// Minimum Goodreads popularity.
    pub min_popularity: Option<f64>,
    /// Skip books without a release date.
    pub skip_missing_date: Option<bool>,
    /// Skip books without an ISBN or ASIN.
    pub skip_missing_isbn: Option<bool>,
    /// Skip parts and sets.
    pub skip_parts_and_sets: Option<bool>,
    /// Skip secondary series books.
    pub skip_series_secondary: Option<bool>,
    /// Allowed language codes.
    pub allowed_languages: Option<Vec<String>>,
    /// Minimum page count.
    pub min_pages: Option<i64>,
    /// Terms that exclude a book.
    pub ignored: Option<Vec<String>>,
}

fn split_languages(languages: &str) -> Vec<String> {
    languages
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

impl ResourceModel for MetadataProfile {
    type Dto = MetadataProfileResource;

    const NAME: &'static str = "metadata_profile";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Metadata Profile resource.")
            .with_attribute("id", Attribute::id().with_description("Metadata Profile ID."))
            .with_attribute(
                "name",
                Attribute::required_string().with_description("Metadata Profile name."),
            )
            .with_attribute(
                "min_popularity",
                Attribute::optional_float64().with_description("Minimum popularity."),
            )
            .with_attribute(
                "skip_missing_date",
                Attribute::optional_bool().with_description("Skip missing date."),
            )
            .with_attribute(
                "skip_missing_isbn",
                Attribute::optional_bool().with_description("Skip missing ISBN."),
            )
            .with_attribute(
                "skip_parts_and_sets",
                Attribute::optional_bool().with_description("Skip parts and sets."),
            )
            .with_attribute(
                "skip_series_secondary",
                Attribute::optional_bool().with_description("Skip series secondary."),
            )
            .with_attribute(
                "allowed_languages",
                Attribute::optional_string_set().with_description("Allowed languages."),
            )
            .with_attribute(
                "min_pages",
                Attribute::optional_int64().with_description("Minimum pages."),
            )
            .with_attribute(
                "ignored",
                Attribute::optional_string_set().with_description("Terms to ignore."),
            )
    }

    fn endpoint(client: &ReadarrClient) -> Endpoint<'_, Self::Dto> {
        client.metadata_profiles()
    }

    fn id(&self) -> i64 {
        self.id.unwrap_or_default()
    }

    fn to_api(&self) -> MetadataProfileResource {
        MetadataProfileResource {
            id: self.id.unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            min_popularity: self.min_popularity.unwrap_or_default(),
            skip_missing_date: self.skip_missing_date.unwrap_or_default(),
            skip_missing_isbn: self.skip_missing_isbn.unwrap_or_default(),
            skip_parts_and_sets: self.skip_parts_and_sets.unwrap_or_default(),
            skip_series_secondary: self.skip_series_secondary.unwrap_or_default(),
            allowed_languages: self.allowed_languages.clone().unwrap_or_default().join(","),
            min_pages: self.min_pages.unwrap_or_default(),
            ignored: self.ignored.clone().unwrap_or_default(),
        }
    }

    fn write_api(&mut self, dto: &MetadataProfileResource) {
        *self = Self {
            id: Some(dto.id),
            name: Some(dto.name.clone()),
            min_popularity: Some(dto.min_popularity),
            skip_missing_date: Some(dto.skip_missing_date),
            skip_missing_isbn: Some(dto.skip_missing_isbn),
            skip_parts_and_sets: Some(dto.skip_parts_and_sets),
            skip_series_secondary: Some(dto.skip_series_secondary),
            allowed_languages: Some(split_languages(&dto.allowed_languages)),
            min_pages: Some(dto.min_pages),
            ignored: Some(dto.ignored.clone()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::tests::assert_schema_matches_model;

    #[test]
    fn test_schema_matches_model() {
        assert_schema_matches_model::<MetadataProfile>();
    }

    #[test]
    fn test_languages_joined() {
        let profile = MetadataProfile {
            name: Some("English".to_string()),
            allowed_languages: Some(vec!["eng".to_string(), "en-US".to_string()]),
            min_popularity: Some(3.5),
            ..Default::default()
        };

        let dto = profile.to_api();
        assert_eq!(dto.allowed_languages, "eng,en-US");
        assert_eq!(dto.min_popularity, 3.5);
        assert!(dto.ignored.is_empty());
    }

    #[test]
    fn test_write_api_splits_languages() {
        let dto = MetadataProfileResource {
            id: 2,
            name: "Standard".to_string(),
            allowed_languages: "eng, null".to_string(),
            ..Default::default()
        };

        let mut profile = MetadataProfile::default();
        profile.write_api(&dto);
        assert_eq!(
            profile.allowed_languages,
            Some(vec!["eng".to_string(), "null".to_string()])
        );

        profile.write_api(&MetadataProfileResource::default());
        assert_eq!(profile.allowed_languages, Some(Vec::new()));
    }
}
