//! Form sanitization and validation helpers shared by the entity forms
//!
//! Submitted forms go through two steps: sanitization (trim, treat empty
//! optional fields as absent) and rule checks declared with `validator`
//! derives on the sanitized input structs. Failing rules are flattened into an
//! ordered list of [`FieldError`]s that the form views display.

use chrono::{NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

/// A single failed rule, as shown next to the form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the form field
    pub param: String,
    /// Human readable message
    pub msg: String,
    /// The sanitized value that failed
    pub value: String,
}

/// Trim a submitted text field; missing fields become empty strings
pub fn trimmed(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// Trim an optional field and drop it when nothing is left
pub fn trimmed_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// HTML-escape user input before it is stored or re-displayed
pub fn escape(value: &str) -> String {
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

/// Calendar (`2024-03-05`, `20240305`, `2024-03`, `2024`), week (`2024-W10-2`)
/// and ordinal (`2024-065`) dates, optionally followed by a time part
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<year>\d{4})(?:-(?P<month>\d{2})(?:-(?P<day>\d{2}))?|-W(?P<week>\d{2})(?:-(?P<weekday>[1-7]))?|-(?P<ordinal>\d{3})|(?P<bmonth>\d{2})(?P<bday>\d{2})|W(?P<bweek>\d{2})(?P<bweekday>[1-7])?|(?P<bordinal>\d{3}))?(?:[T\s](?P<time>.+))?$",
    )
    .unwrap()
});

/// `hh[:mm[:ss]][.fff]` in extended or basic form, then `Z` or an offset
static ISO_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:[01]\d|2[0-3])(?::?[0-5]\d(?::?[0-5]\d)?)?|24(?::?00)?)(?:[.,]\d+)?(?:[zZ]|[+-](?:[01]\d|2[0-3])(?::?[0-5]\d)?)?$",
    )
    .unwrap()
});

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Parse an ISO-8601 date or date-time, keeping only the calendar date.
///
/// Reduced precision dates resolve to the first day of the period. The date
/// is the one written, whatever the offset; a time part is only accepted after
/// a complete date.
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    let caps = ISO_DATE.captures(value)?;
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
    let year: i32 = caps["year"].parse().ok()?;

    let (date, complete) = if let Some(month) = number("month").or_else(|| number("bmonth")) {
        let day = number("day").or_else(|| number("bday"));
        (NaiveDate::from_ymd_opt(year, month, day.unwrap_or(1))?, day.is_some())
    } else if let Some(week) = number("week").or_else(|| number("bweek")) {
        let weekday = number("weekday").or_else(|| number("bweekday"));
        let day = WEEKDAYS[weekday.unwrap_or(1) as usize - 1];
        (NaiveDate::from_isoywd_opt(year, week, day)?, weekday.is_some())
    } else if let Some(ordinal) = number("ordinal").or_else(|| number("bordinal")) {
        (NaiveDate::from_yo_opt(year, ordinal)?, true)
    } else {
        (NaiveDate::from_ymd_opt(year, 1, 1)?, false)
    };

    match caps.name("time") {
        Some(time) if !complete || !ISO_TIME.is_match(time.as_str()) => None,
        _ => Some(date),
    }
}

pub fn validate_iso8601(value: &str) -> Result<(), ValidationError> {
    match parse_iso8601(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("iso8601")),
    }
}

/// ASCII letters and digits only; the empty string does not qualify
pub static ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

/// Longest name the author collection accepts
pub const MAX_NAME_LENGTH: usize = 100;

pub fn validate_name_length(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() <= MAX_NAME_LENGTH {
        Ok(())
    } else {
        Err(ValidationError::new("max_length"))
    }
}

/// Flatten `validator` errors into display order.
///
/// `fields` pairs each field name with its sanitized value; errors come out in
/// that order, and within a field in the order the rules were declared.
pub fn collect_errors(errors: &ValidationErrors, fields: &[(&str, &str)]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for (name, value) in fields {
        let Some(field_errors) = by_field.get(*name) else {
            continue;
        };
        for error in field_errors.iter() {
            let msg = error
                .message
                .clone()
                .unwrap_or_else(|| Cow::Owned(format!("Invalid value ({})", error.code)));
            out.push(FieldError {
                param: name.to_string(),
                msg: msg.into_owned(),
                value: value.to_string(),
            });
        }
    }
    out
}
