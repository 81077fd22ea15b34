//! Book model and form

use serde::{Deserialize, Serialize};

use crate::validation::{escape_html, unescape_html, Checks, FieldErrors, Text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    /// Author id
    pub author: String,
    pub summary: String,
    pub isbn: String,
    /// Genre ids
    #[serde(default)]
    pub genre: Vec<String>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/books/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookData {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

/// Book form as submitted; `genre` repeats once per checked genre
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn clean(&self) -> Result<BookData, FieldErrors> {
        let mut checks = Checks::new();
        let title = checks.text(
            "title",
            Text::new(&self.title).required("Title must not be empty."),
        );
        let author = checks.text(
            "author",
            Text::new(&self.author).required("Author must not be empty."),
        );
        let summary = checks.text(
            "summary",
            Text::new(&self.summary).required("Summary must not be empty."),
        );
        let isbn = checks.text("isbn", Text::new(&self.isbn).required("ISBN must not be empty."));
        let genre = self
            .genre
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(escape_html)
            .collect();

        checks.finish(BookData {
            title,
            author,
            summary,
            isbn,
            genre,
        })
    }

    pub fn has_genre(&self, genre_id: &str) -> bool {
        self.genre.iter().any(|g| g.trim() == genre_id)
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: unescape_html(&book.title),
            author: unescape_html(&book.author),
            summary: unescape_html(&book.summary),
            isbn: unescape_html(&book.isbn),
            genre: book.genre.iter().map(|g| unescape_html(g)).collect(),
        }
    }
}
