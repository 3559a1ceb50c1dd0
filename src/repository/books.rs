//! Book queries on Repository (read-mostly)

use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{Book, BookData, BookSummary},
};

impl Repository {
    /// Title projection of every book, for pickers
    pub async fn books_list(&self) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BookSummary::with_url).collect())
    }

    pub async fn books_by_author_id(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT id, title, summary FROM books WHERE author_id = $1 ORDER BY title ASC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BookSummary::with_url).collect())
    }

    pub async fn books_insert(&self, data: &BookData) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, summary, author_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, summary, author_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.title)
        .bind(&data.summary)
        .bind(data.author)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
