//! Book pages

use maud::{html, Markup};

use super::{delete_form, error_list, layout, stored};
use crate::{
    models::{Book, BookForm, BookInstance, BookStatus},
    services::{
        books::{BookDetail, BookFormChoices, BookListEntry},
        guard::Dependents,
    },
    validation::{unescape_html, FieldErrors},
};

pub fn list(entries: &[BookListEntry]) -> Markup {
    layout(
        "Book List",
        html! {
            @if entries.is_empty() {
                p { "There are no books." }
            } @else {
                ul {
                    @for entry in entries {
                        li {
                            a href=(entry.book.url()) { (stored(&entry.book.title)) }
                            @if let Some(author) = &entry.author {
                                " (" (stored(&author.name())) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub(crate) fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    }
}

fn copies(instances: &[BookInstance]) -> Markup {
    html! {
        @for copy in instances {
            hr;
            p class=(status_class(copy.status)) { (copy.status.as_str()) }
            p { strong { "Imprint: " } (stored(&copy.imprint)) }
            @if copy.status != BookStatus::Available {
                p { strong { "Due back: " } (copy.due_back_formatted()) }
            }
            p { strong { "Id: " } a href=(copy.url()) { (copy.id) } }
        }
    }
}

pub fn detail(detail: &BookDetail) -> Markup {
    let book = &detail.book;
    layout(
        &format!("Title: {}", unescape_html(&book.title)),
        html! {
            p {
                strong { "Author: " }
                @if let Some(author) = &detail.author {
                    a href=(author.url()) { (stored(&author.name())) }
                } @else {
                    "Unknown"
                }
            }
            p { strong { "Summary: " } (stored(&book.summary)) }
            p { strong { "ISBN: " } (stored(&book.isbn)) }
            p {
                strong { "Genre: " }
                @for (i, genre) in detail.genres.iter().enumerate() {
                    @if i > 0 { ", " }
                    a href=(genre.url()) { (stored(&genre.name)) }
                }
            }
            div {
                h4 { "Copies" }
                @if detail.instances.is_empty() {
                    p { "There are no copies of this book in the library." }
                } @else {
                    (copies(&detail.instances))
                }
            }
            hr;
            p { a href={ (book.url()) "/delete" } { "Delete book" } }
            p { a href={ (book.url()) "/update" } { "Update book" } }
        },
    )
}

pub fn form(
    title: &str,
    form: &BookForm,
    choices: &BookFormChoices,
    errors: Option<&FieldErrors>,
) -> Markup {
    layout(
        title,
        html! {
            form method="POST" action="" {
                div {
                    label for="title" { "Title:" }
                    input id="title" type="text" name="title" placeholder="Name of book"
                        value=(form.title) required;
                }
                div {
                    label for="author" { "Author:" }
                    select id="author" name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in &choices.authors {
                            option value=(author.id) selected[form.author.trim() == author.id] {
                                (stored(&author.name()))
                            }
                        }
                    }
                }
                div {
                    label for="summary" { "Summary:" }
                    textarea id="summary" name="summary" placeholder="Summary" required {
                        (form.summary)
                    }
                }
                div {
                    label for="isbn" { "ISBN:" }
                    input id="isbn" type="text" name="isbn" placeholder="ISBN13"
                        value=(form.isbn) required;
                }
                div {
                    label { "Genre:" }
                    @for genre in &choices.genres {
                        div {
                            input type="checkbox" name="genre" id={ "genre-" (genre.id) }
                                value=(genre.id) checked[form.has_genre(&genre.id)];
                            label for={ "genre-" (genre.id) } { (stored(&genre.name)) }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

pub fn delete(dependents: &Dependents<Book, BookInstance>) -> Markup {
    let book = &dependents.record;
    layout(
        &format!("Delete Book: {}", unescape_html(&book.title)),
        html! {
            p { strong { "Summary: " } (stored(&book.summary)) }
            @if dependents.blockers.is_empty() {
                p { "Do you really want to delete this Book?" }
                (delete_form("bookid", &book.id))
            } @else {
                p {
                    strong { "Delete the following copies before attempting to delete this book." }
                }
                div {
                    h4 { "Copies" }
                    (copies(&dependents.blockers))
                }
            }
        },
    )
}
