//! The naming config singleton.

use serde::{Deserialize, Serialize};

use super::settings::{SettingsModel, SETTINGS_ID};
use crate::client::models::NamingConfigResource;
use crate::client::{ReadarrClient, Settings};
use crate::schema::{Attribute, Schema};

/// File and folder naming rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Naming {
    /// Always 1.
    pub id: Option<i64>,
    /// Rename imported files.
    pub rename_books: Option<bool>,
    /// Replace rather than remove illegal characters.
    pub replace_illegal_characters: Option<bool>,
    /// Colon replacement mode, 0 to 4.
    pub colon_replacement_format: Option<i64>,
    /// Author folder name template.
    pub author_folder_format: Option<String>,
    /// Book file name template.
    pub standard_book_format: Option<String>,
}

impl SettingsModel for Naming {
    type Dto = NamingConfigResource;

    const NAME: &'static str = "naming";

    fn schema() -> Schema {
        Schema::v0()
            .with_description("Naming resource.")
            .with_attribute("id", Attribute::id().with_description("Naming ID."))
            .with_attribute(
                "rename_books",
                Attribute::required_bool()
                    .with_description("Readarr will use the existing file name if false."),
            )
            .with_attribute(
                "replace_illegal_characters",
                Attribute::required_bool().with_description(
                    "Replace illegal characters. They will be removed if false.",
                ),
            )
            .with_attribute(
                "colon_replacement_format",
                Attribute::required_int64()
                    .one_of_int(&[0, 1, 2, 3, 4])
                    .with_description("Change how Readarr handles colon replacement. `0` Delete, `1` Dash, `2` Space Dash, `3` Space Dash Space, `4` Smart."),
            )
            .with_attribute(
                "author_folder_format",
                Attribute::required_string().with_description("Author folder format."),
            )
            .with_attribute(
                "standard_book_format",
                Attribute::required_string().with_description("Standard book format."),
            )
    }

    fn settings(client: &ReadarrClient) -> Settings<'_, Self::Dto> {
        client.naming()
    }

    fn to_api(&self) -> NamingConfigResource {
        NamingConfigResource {
            id: SETTINGS_ID,
            rename_books: self.rename_books.unwrap_or_default(),
            replace_illegal_characters: self.replace_illegal_characters.unwrap_or_default(),
            colon_replacement_format: self.colon_replacement_format.unwrap_or_default(),
            standard_book_format: self.standard_book_format.clone().unwrap_or_default(),
            author_folder_format: self.author_folder_format.clone().unwrap_or_default(),
        }
    }

    fn from_api(dto: &NamingConfigResource) -> Self {
        Self {
            id: Some(dto.id),
            rename_books: Some(dto.rename_books),
            replace_illegal_characters: Some(dto.replace_illegal_characters),
            colon_replacement_format: Some(dto.colon_replacement_format),
            author_folder_format: Some(dto.author_folder_format.clone()),
            standard_book_format: Some(dto.standard_book_format.clone()),
        }
    }
}
