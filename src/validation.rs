//! Form validation and sanitization
//!
//! Every form submission goes through [`Checks`]: each field is trimmed, run
//! through its rules in order, and escaped before it is accepted into a record.
//! Only the first failing rule of a field is reported, and fields are reported
//! in the order they were checked.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9]+$").expect("alphanumeric pattern is valid"));

/// A failed rule on a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered, non-empty list of field errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field,
            message: message.into(),
        }])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message reported for `field`, if any
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Trimmed text value and the first rule it failed
#[derive(Debug)]
pub struct Text {
    value: String,
    failure: Option<String>,
}

impl Text {
    pub fn new(raw: &str) -> Self {
        Self {
            value: raw.trim().to_string(),
            failure: None,
        }
    }

    fn rule(mut self, passes: impl FnOnce(&str) -> bool, message: &str) -> Self {
        if self.failure.is_none() && !passes(&self.value) {
            self.failure = Some(message.to_string());
        }
        self
    }

    pub fn required(self, message: &str) -> Self {
        self.min_chars(1, message)
    }

    pub fn min_chars(self, min: usize, message: &str) -> Self {
        self.rule(|v| v.chars().count() >= min, message)
    }

    pub fn max_chars(self, max: usize, message: &str) -> Self {
        self.rule(|v| v.chars().count() <= max, message)
    }

    pub fn alphanumeric(self, message: &str) -> Self {
        self.rule(|v| ALPHANUMERIC.is_match(v), message)
    }
}

/// Collects field errors while a form is being normalized
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `text` as an escaped string, or records its failure and
    /// returns an empty one.
    pub fn text(&mut self, field: &'static str, text: Text) -> String {
        match text.failure {
            Some(message) => {
                self.errors.push(FieldError { field, message });
                String::new()
            }
            None => escape_html(&text.value),
        }
    }

    /// Blank input is `None`; anything else must be an ISO-8601 date.
    pub fn optional_date(
        &mut self,
        field: &'static str,
        raw: &str,
        message: &str,
    ) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = parse_iso_date(raw);
        if parsed.is_none() {
            self.fail(field, message);
        }
        parsed
    }

    pub fn fail(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn finish<T>(self, record: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(record)
        } else {
            Err(FieldErrors(self.errors))
        }
    }
}

/// Local date-time forms, without an offset
const LOCAL_DATE_TIMES: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 date or date-time, keeping the calendar date
///
/// Accepts `YYYY-MM-DD`, basic `YYYYMMDD`, local date-times with minute or
/// (fractional) second precision, and RFC 3339 date-times with an offset.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    ["%Y-%m-%d", "%Y%m%d"]
        .into_iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            LOCAL_DATE_TIMES
                .into_iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Escape HTML-significant characters before a value is stored
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape_html`], used to put stored values back into form inputs
pub fn unescape_html(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&#x2F;", "/")
        .replace("&#x5C;", "\\")
        .replace("&#96;", "`")
        .replace("&amp;", "&")
}
