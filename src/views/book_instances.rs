//! Book instance (copy) pages

use maud::{html, Markup};

use super::{books::status_class, delete_form, error_list, layout, stored};
use crate::{
    models::{Book, BookInstanceForm, BookStatus},
    services::book_instances::BookInstanceEntry,
    validation::FieldErrors,
};

fn book_link(book: Option<&Book>) -> Markup {
    html! {
        @match book {
            Some(book) => a href=(book.url()) { (stored(&book.title)) },
            None => "Unknown book",
        }
    }
}

pub fn list(entries: &[BookInstanceEntry]) -> Markup {
    layout(
        "Book Instance List",
        html! {
            @if entries.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul {
                    @for entry in entries {
                        @let copy = &entry.instance;
                        li {
                            a href=(copy.url()) {
                                @match &entry.book {
                                    Some(book) => (stored(&book.title)),
                                    None => "Unknown book",
                                }
                                " : " (stored(&copy.imprint))
                            }
                            " - "
                            span class=(status_class(copy.status)) { (copy.status.as_str()) }
                            @if copy.status != BookStatus::Available {
                                " (Due: " (copy.due_back_formatted()) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn detail(entry: &BookInstanceEntry) -> Markup {
    let copy = &entry.instance;
    layout(
        &format!("Copy: {}", copy.id),
        html! {
            p { strong { "Title: " } (book_link(entry.book.as_ref())) }
            p { strong { "Imprint: " } (stored(&copy.imprint)) }
            p {
                strong { "Status: " }
                span class=(status_class(copy.status)) { (copy.status.as_str()) }
            }
            @if copy.status != BookStatus::Available {
                p { strong { "Due back: " } (copy.due_back_formatted()) }
            }
            hr;
            p { a href={ (copy.url()) "/delete" } { "Delete BookInstance" } }
            p { a href={ (copy.url()) "/update" } { "Update BookInstance" } }
        },
    )
}

pub fn form(
    title: &str,
    form: &BookInstanceForm,
    books: &[Book],
    errors: Option<&FieldErrors>,
) -> Markup {
    let current_status = form.status.trim();
    layout(
        title,
        html! {
            form method="POST" action="" {
                div {
                    label for="book" { "Book:" }
                    select id="book" name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in books {
                            option value=(book.id) selected[form.book.trim() == book.id] {
                                (stored(&book.title))
                            }
                        }
                    }
                }
                div {
                    label for="imprint" { "Imprint:" }
                    input id="imprint" type="text" name="imprint"
                        placeholder="Publisher and date information" value=(form.imprint) required;
                }
                div {
                    label for="due_back" { "Date when book available:" }
                    input id="due_back" type="date" name="due_back" value=(form.due_back);
                }
                div {
                    label for="status" { "Status:" }
                    select id="status" name="status" required {
                        option value="" { "--Please select a status--" }
                        @for status in BookStatus::ALL {
                            option
                                value=(status.as_str())
                                selected[current_status == status.as_str()]
                            {
                                (status.as_str())
                            }
                        }
                    }
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

pub fn delete(entry: &BookInstanceEntry) -> Markup {
    let copy = &entry.instance;
    layout(
        &format!("Delete Book Instance: {}", copy.id),
        html! {
            p { strong { "Title: " } (book_link(entry.book.as_ref())) }
            p { strong { "Imprint: " } (stored(&copy.imprint)) }
            p { strong { "Status: " } (copy.status.as_str()) }
            p { "Do you really want to delete this Book Instance?" }
            (delete_form("bookinstanceid", &copy.id))
        },
    )
}
