//! Catalog home page

use maud::{html, Markup};

use super::layout;
use crate::services::catalog::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Markup {
    layout(
        "Local Library Home",
        html! {
            p {
                "Welcome to " em { "LocalLibrary" } ", a very basic library catalog."
            }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books: " } (counts.books) }
                li { strong { "Copies: " } (counts.book_instances) }
                li { strong { "Copies available: " } (counts.book_instances_available) }
                li { strong { "Authors: " } (counts.authors) }
                li { strong { "Genres: " } (counts.genres) }
            }
        },
    )
}
