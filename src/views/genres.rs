//! Genre pages

use maud::{html, Markup};

use super::{delete_form, error_list, layout, stored};
use crate::{
    models::{Book, Genre, GenreForm},
    services::{genres::GenreDetail, guard::Dependents},
    validation::{unescape_html, FieldErrors},
};

pub fn list(genres: &[Genre]) -> Markup {
    layout(
        "Genre List",
        html! {
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in genres {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
                    }
                }
            }
        },
    )
}

fn books_list(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(detail: &GenreDetail) -> Markup {
    let genre = &detail.genre;
    layout(
        &format!("Genre: {}", unescape_html(&genre.name)),
        html! {
            div {
                h4 { "Books" }
                @if detail.books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    (books_list(&detail.books))
                }
            }
            hr;
            p { a href={ (genre.url()) "/delete" } { "Delete genre" } }
            p { a href={ (genre.url()) "/update" } { "Update genre" } }
        },
    )
}

pub fn form(title: &str, form: &GenreForm, errors: Option<&FieldErrors>) -> Markup {
    layout(
        title,
        html! {
            form method="POST" action="" {
                div {
                    label for="name" { "Genre:" }
                    input id="name" type="text" name="name" placeholder="Fantasy, Poetry etc."
                        value=(form.name) required;
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

pub fn delete(dependents: &Dependents<Genre, Book>) -> Markup {
    let genre = &dependents.record;
    layout(
        &format!("Delete Genre: {}", unescape_html(&genre.name)),
        html! {
            @if dependents.blockers.is_empty() {
                p { "Do you really want to delete this Genre?" }
                (delete_form("genreid", &genre.id))
            } @else {
                p {
                    strong { "Delete the following books before attempting to delete this genre." }
                }
                div {
                    h4 { "Books" }
                    (books_list(&dependents.blockers))
                }
            }
        },
    )
}
