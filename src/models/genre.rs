//! Genre model and form

use serde::{Deserialize, Serialize};

use crate::validation::{unescape_html, Checks, FieldErrors, Text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genres/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreData {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenreForm {
    pub name: String,
}

impl GenreForm {
    pub fn clean(&self) -> Result<GenreData, FieldErrors> {
        let mut checks = Checks::new();
        let name = checks.text(
            "name",
            Text::new(&self.name)
                .min_chars(3, "Genre name must contain at least 3 characters")
                .max_chars(100, "Genre name must be less than 100 characters"),
        );
        checks.finish(GenreData { name })
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: unescape_html(&genre.name),
        }
    }
}
