//! Author pages

use maud::{html, Markup};

use super::{delete_form, error_list, layout, stored};
use crate::{
    models::{Author, AuthorForm, Book},
    services::{authors::AuthorDetail, guard::Dependents},
    validation::{unescape_html, FieldErrors},
};

pub fn list(authors: &[Author]) -> Markup {
    layout(
        "Author List",
        html! {
            @if authors.is_empty() {
                p { "There are no authors." }
            } @else {
                ul {
                    @for author in authors {
                        li {
                            a href=(author.url()) { (stored(&author.name())) }
                            " (" (author.lifespan()) ")"
                        }
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

pub fn detail(detail: &AuthorDetail) -> Markup {
    let author = &detail.author;
    layout(
        &format!("Author: {}", unescape_html(&author.name())),
        html! {
            p { (author.lifespan()) }
            div {
                h4 { "Books" }
                @if detail.books.is_empty() {
                    p { "This author has no books." }
                } @else {
                    (books_list(&detail.books))
                }
            }
            hr;
            p { a href={ (author.url()) "/delete" } { "Delete author" } }
            p { a href={ (author.url()) "/update" } { "Update author" } }
        },
    )
}

pub fn form(title: &str, form: &AuthorForm, errors: Option<&FieldErrors>) -> Markup {
    layout(
        title,
        html! {
            form method="POST" action="" {
                div {
                    label for="first_name" { "First Name:" }
                    input id="first_name" type="text" name="first_name" placeholder="First name"
                        value=(form.first_name) required;
                    label for="family_name" { "Family Name:" }
                    input id="family_name" type="text" name="family_name" placeholder="Family name"
                        value=(form.family_name) required;
                }
                div {
                    label for="date_of_birth" { "Date of birth:" }
                    input id="date_of_birth" type="date" name="date_of_birth"
                        value=(form.date_of_birth);
                }
                div {
                    label for="date_of_death" { "Date of death:" }
                    input id="date_of_death" type="date" name="date_of_death"
                        value=(form.date_of_death);
                }
                button type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

pub fn delete(dependents: &Dependents<Author, Book>) -> Markup {
    let author = &dependents.record;
    layout(
        &format!("Delete Author: {}", unescape_html(&author.name())),
        html! {
            p { (author.lifespan()) }
            @if dependents.blockers.is_empty() {
                p { "Do you really want to delete this Author?" }
                (delete_form("authorid", &author.id))
            } @else {
                p {
                    strong { "Delete the following books before attempting to delete this author." }
                }
                div {
                    h4 { "Books" }
                    (books_list(&dependents.blockers))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn austen() -> Author {
        Author {
            id: "a1".to_string(),
            first_name: "Jane".to_string(),
            family_name: "Austen".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1775, 12, 16),
            date_of_death: None,
        }
    }

    #[test]
    fn test_detail_links() {
        let html = detail(&AuthorDetail {
            author: austen(),
            books: vec![],
        })
        .into_string();
        assert!(html.contains("Author: Austen, Jane"));
        assert!(html.contains("Dec 16, 1775 - "));
        assert!(html.contains(r#"href="/catalog/authors/a1/delete""#));
        assert!(html.contains("This author has no books."));
    }

    #[test]
    fn test_form_keeps_raw_input_escaped_once() {
        let raw = AuthorForm {
            first_name: "<Jane>".to_string(),
            ..Default::default()
        };
        let errors = raw.clean().unwrap_err();
        let html = form("Create Author", &raw, Some(&errors)).into_string();
        assert!(html.contains(r#"value="&lt;Jane&gt;""#));
        assert!(html.contains("First name has non-alphanumeric characters."));
    }

    #[test]
    fn test_delete_without_blockers_offers_form() {
        let html = delete(&Dependents {
            record: austen(),
            blockers: vec![],
        })
        .into_string();
        assert!(html.contains(r#"name="authorid""#));
        assert!(html.contains(r#"value="a1""#));
    }
}
