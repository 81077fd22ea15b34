//! Book instance (physical copy) model and form

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_date_input, format_date_medium};
use crate::validation::{unescape_html, Checks, FieldErrors, Text};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Available,
        BookStatus::Maintenance,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: String,
    /// Book id
    pub book: String,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstances/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_date_medium).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceData {
    pub book: String,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookInstanceForm {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

impl BookInstanceForm {
    pub fn clean(&self) -> Result<BookInstanceData, FieldErrors> {
        let mut checks = Checks::new();
        let book = checks.text("book", Text::new(&self.book).required("Book must be specified"));
        let imprint = checks.text(
            "imprint",
            Text::new(&self.imprint).required("Imprint must be specified"),
        );
        let status = match self.status.trim() {
            "" => BookStatus::default(),
            raw => raw.parse().unwrap_or_else(|_| {
                checks.fail("status", "Invalid status");
                BookStatus::default()
            }),
        };
        let due_back = checks.optional_date("due_back", &self.due_back, "Invalid date");

        checks.finish(BookInstanceData {
            book,
            imprint,
            status,
            due_back,
        })
    }
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book: unescape_html(&instance.book),
            imprint: unescape_html(&instance.imprint),
            status: instance.status.to_string(),
            due_back: format_date_input(instance.due_back),
        }
    }
}
