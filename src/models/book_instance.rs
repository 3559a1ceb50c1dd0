//! Book instance (physical copy) model and form

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::book::BookSummary;
use crate::validation::{collect_errors, escape, parse_iso8601, trimmed, trimmed_optional, FieldError};

/// Copy availability
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "book_instance_status")]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown book instance status: {}", s))
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: Uuid,
    /// Reference to the copied book
    #[sqlx(rename = "book_id")]
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

/// A book instance together with its resolved book, if the reference resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceRecord {
    pub instance: BookInstance,
    pub book: Option<BookSummary>,
}

/// Validated book instance fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceData {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

impl BookInstance {
    pub fn from_data(id: Uuid, data: BookInstanceData) -> Self {
        Self {
            id,
            book: data.book,
            imprint: data.imprint,
            status: data.status,
            due_back: data.due_back,
        }
    }

    pub fn url(&self) -> String {
        book_instance_url(self.id)
    }

    /// Due date as DD-MM-YYYY
    pub fn due_back_formatted(&self) -> String {
        self.due_back.format("%d-%m-%Y").to_string()
    }
}

/// Book instance as handed to the views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceView {
    pub id: Uuid,
    pub book_id: Uuid,
    /// Resolved book; absent when the reference is dangling
    pub book: Option<BookSummary>,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
    pub url: String,
}

impl From<BookInstanceRecord> for BookInstanceView {
    fn from(record: BookInstanceRecord) -> Self {
        let BookInstanceRecord { instance, book } = record;
        Self {
            url: instance.url(),
            due_back_formatted: instance.due_back_formatted(),
            due_back_yyyy_mm_dd: instance.due_back.to_string(),
            id: instance.id,
            book_id: instance.book,
            book,
            imprint: instance.imprint,
            status: instance.status,
            due_back: instance.due_back,
        }
    }
}

/// Raw book instance form as submitted
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub imprint: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_back: Option<String>,
}

/// Sanitized book instance form; also what the form view re-displays
#[derive(Debug, Clone, Serialize, Validate, ToSchema)]
pub struct BookInstanceInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[validate(
        length(min = 1, message = "Book must be specified"),
        custom(function = validate_reference, message = "Book must be specified")
    )]
    pub book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[validate(custom(function = validate_status, message = "Invalid status"))]
    pub status: String,
    #[validate(custom(
        function = crate::validation::validate_iso8601,
        message = "Invalid date"
    ))]
    pub due_back: Option<String>,
}

/// Empty references are left to the length rule
fn validate_reference(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || Uuid::parse_str(value).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("reference"))
    }
}

/// Empty status falls back to the default
fn validate_status(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<BookInstanceStatus>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("status"))
    }
}

impl BookInstanceForm {
    pub fn sanitize(&self) -> BookInstanceInput {
        BookInstanceInput {
            id: None,
            book: escape(&trimmed(self.book.as_deref())),
            imprint: escape(&trimmed(self.imprint.as_deref())),
            status: escape(&trimmed(self.status.as_deref())),
            due_back: trimmed_optional(self.due_back.as_deref()),
        }
    }
}

impl BookInstanceInput {
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// The submitted book reference, when it is a well-formed identifier
    pub fn selected_book(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.book).ok()
    }

    /// Run the book instance rules; a missing due date becomes today (UTC)
    pub fn check(&self) -> Result<BookInstanceData, Vec<FieldError>> {
        let invalid = |errors: ValidationErrors| {
            collect_errors(
                &errors,
                &[
                    ("book", self.book.as_str()),
                    ("imprint", self.imprint.as_str()),
                    ("status", self.status.as_str()),
                    ("due_back", self.due_back.as_deref().unwrap_or_default()),
                ],
            )
        };
        self.validate().map_err(invalid)?;

        let book = Uuid::parse_str(&self.book).map_err(|_| {
            vec![FieldError {
                param: "book".to_string(),
                msg: "Book must be specified".to_string(),
                value: self.book.clone(),
            }]
        })?;
        let status = self.status.parse().unwrap_or_default();
        let due_back = self
            .due_back
            .as_deref()
            .and_then(parse_iso8601)
            .unwrap_or_else(|| Utc::now().date_naive());

        Ok(BookInstanceData {
            book,
            imprint: self.imprint.clone(),
            status,
            due_back,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(due_back: NaiveDate) -> BookInstance {
        BookInstance {
            id: Uuid::nil(),
            book: Uuid::nil(),
            imprint: "Gollancz, 2011".to_string(),
            status: BookInstanceStatus::Available,
            due_back,
        }
    }

    fn form(book: &str, imprint: &str) -> BookInstanceForm {
        BookInstanceForm {
            book: Some(book.to_string()),
            imprint: Some(imprint.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_due_back_formatted_is_zero_padded() {
        let i = instance(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(i.due_back_formatted(), "05-03-2024");
        let i = instance(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        assert_eq!(i.due_back_formatted(), "31-12-1999");
    }

    #[test]
    fn test_status_round_trips_through_text() {
        for status in BookInstanceStatus::ALL {
            assert_eq!(status.to_string().parse::<BookInstanceStatus>(), Ok(status));
        }
        assert!("Lost".parse::<BookInstanceStatus>().is_err());
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
    }

    #[test]
    fn test_view_exposes_url_and_formatted_date() {
        let record = BookInstanceRecord {
            instance: instance(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()),
            book: None,
        };
        let view = BookInstanceView::from(record);
        assert_eq!(view.url, format!("/catalog/bookinstance/{}", Uuid::nil()));
        assert_eq!(view.due_back_formatted, "05-03-2024");
        assert_eq!(view.due_back_yyyy_mm_dd, "2024-03-05");
    }

    #[test]
    fn test_due_back_accepts_offset_date_times() {
        let mut f = form(&Uuid::new_v4().to_string(), "Penguin");
        f.due_back = Some("2024-03-05T10:20Z".to_string());
        let data = f.sanitize().check().unwrap();
        assert_eq!(data.due_back, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_defaults_status_and_due_back() {
        let book = Uuid::new_v4();
        let data = form(&book.to_string(), " Penguin ").sanitize().check().unwrap();
        assert_eq!(data.book, book);
        assert_eq!(data.imprint, "Penguin");
        assert_eq!(data.status, BookInstanceStatus::Maintenance);
        assert_eq!(data.due_back, Utc::now().date_naive());
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let mut f = form("", "");
        f.status = Some("Lost".to_string());
        f.due_back = Some("someday".to_string());

        let errors = f.sanitize().check().unwrap_err();
        let messages: Vec<(&str, &str)> = errors
            .iter()
            .map(|e| (e.param.as_str(), e.msg.as_str()))
            .collect();
        assert_eq!(
            messages,
            vec![
                ("book", "Book must be specified"),
                ("imprint", "Imprint must be specified"),
                ("status", "Invalid status"),
                ("due_back", "Invalid date"),
            ]
        );
    }

    #[test]
    fn test_malformed_book_reference() {
        let errors = form("not-an-id", "Penguin").sanitize().check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].param, "book");
        assert_eq!(errors[0].value, "not-an-id");
    }

    #[test]
    fn test_imprint_is_escaped() {
        let input = form(&Uuid::new_v4().to_string(), "Faber & Faber").sanitize();
        assert_eq!(input.imprint, "Faber &amp; Faber");
    }
}
