//! Book model (read-only from the catalog controllers)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Full book record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    /// Reference to the book's author
    #[sqlx(rename = "author_id")]
    pub author: Uuid,
}

/// Title/summary projection used by listings and pickers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    /// Derived, never stored
    #[sqlx(skip)]
    #[serde(default)]
    pub url: String,
}

/// Data for a new book
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookData {
    pub title: String,
    pub summary: String,
    pub author: Uuid,
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

impl BookSummary {
    /// Fill the derived `url` once the row is loaded
    pub fn with_url(mut self) -> Self {
        self.url = book_url(self.id);
        self
    }
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        BookSummary {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            url: book_url(book.id),
        }
    }
}
