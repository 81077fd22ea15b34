//! Server-rendered HTML views
//!
//! Stored strings were escaped when they were accepted, so they are emitted
//! with [`stored`] instead of being escaped a second time. Raw form input is
//! always rendered through maud's normal escaping.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::validation::FieldErrors;

/// Emit a value that was escaped before it was stored
pub fn stored(value: &str) -> PreEscaped<&str> {
    PreEscaped(value)
}

/// Page shell with the catalog sidebar
pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Local Library" }
            }
            body {
                nav {
                    ul {
                        li { a href="/catalog" { "Home" } }
                        li { a href="/catalog/books" { "All books" } }
                        li { a href="/catalog/authors" { "All authors" } }
                        li { a href="/catalog/genres" { "All genres" } }
                        li { a href="/catalog/bookinstances" { "All book-instances" } }
                    }
                    hr;
                    ul {
                        li { a href="/catalog/authors/create" { "Create new author" } }
                        li { a href="/catalog/genres/create" { "Create new genre" } }
                        li { a href="/catalog/books/create" { "Create new book" } }
                        li {
                            a href="/catalog/bookinstances/create" {
                                "Create new book instance (copy)"
                            }
                        }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

/// Validation messages above a form
pub fn error_list(errors: Option<&FieldErrors>) -> Markup {
    html! {
        @if let Some(errors) = errors {
            ul class="errors" {
                @for error in errors.iter() {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}

/// Hidden-id form confirming a delete
pub fn delete_form(field: &str, id: &str) -> Markup {
    html! {
        form method="POST" action="" {
            input type="hidden" name=(field) value=(id);
            button type="submit" { "Delete" }
        }
    }
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        html! {
            p class="error" { (message) }
            p { "Status " (status.as_u16()) }
        },
    )
}
