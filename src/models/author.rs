//! Author model and form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date_input, format_date_medium};
use crate::validation::{unescape_html, Checks, FieldErrors, Text};

/// Stored author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, "family, first"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// "birth - death", either side blank when unknown
    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_date_medium).unwrap_or_default();
        let death = self.date_of_death.map(format_date_medium).unwrap_or_default();
        format!("{} - {}", birth, death)
    }

    pub fn url(&self) -> String {
        format!("/catalog/authors/{}", self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        self.date_of_birth.map(format_date_medium).unwrap_or_default()
    }

    pub fn date_of_death_formatted(&self) -> String {
        self.date_of_death.map(format_date_medium).unwrap_or_default()
    }
}

/// Validated author fields, ready to store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author form as submitted
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthorForm {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl AuthorForm {
    pub fn clean(&self) -> Result<AuthorData, FieldErrors> {
        let mut checks = Checks::new();
        let first_name = checks.text(
            "first_name",
            Text::new(&self.first_name)
                .required("First name must be specified.")
                .max_chars(100, "First name must be less than 100 characters.")
                .alphanumeric("First name has non-alphanumeric characters."),
        );
        let family_name = checks.text(
            "family_name",
            Text::new(&self.family_name)
                .required("Family name must be specified.")
                .max_chars(100, "Family name must be less than 100 characters.")
                .alphanumeric("Family name has non-alphanumeric characters."),
        );
        let date_of_birth =
            checks.optional_date("date_of_birth", &self.date_of_birth, "Invalid date of birth.");
        let date_of_death =
            checks.optional_date("date_of_death", &self.date_of_death, "Invalid date of death.");

        checks.finish(AuthorData {
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        })
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: unescape_html(&author.first_name),
            family_name: unescape_html(&author.family_name),
            date_of_birth: format_date_input(author.date_of_birth),
            date_of_death: format_date_input(author.date_of_death),
        }
    }
}
