//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use author::{Author, AuthorData, AuthorForm};
pub use book::{Book, BookData, BookForm};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceForm, BookStatus};
pub use genre::{Genre, GenreData, GenreForm};

/// Medium date style used on detail pages, e.g. "Dec 16, 1775"
pub fn format_date_medium(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Calendar date as expected by `<input type="date">`
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Body of a delete confirmation form
///
/// Each entity's form names the field after itself (`authorid`, `genreid`,
/// `bookid`, `bookinstanceid`).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DeleteConfirmation {
    #[serde(
        default,
        alias = "authorid",
        alias = "genreid",
        alias = "bookid",
        alias = "bookinstanceid"
    )]
    #[validate(length(min = 1, message = "Missing id of the record to delete"))]
    pub id: String,
}

impl DeleteConfirmation {
    /// Check the confirmed id against the record named in the path
    pub fn confirm(&self, path_id: &str) -> AppResult<()> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if self.id.trim() != path_id {
            return Err(AppError::BadRequest(
                "Confirmed id does not match the record being deleted".to_string(),
            ));
        }
        Ok(())
    }
}
