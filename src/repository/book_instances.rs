//! Book instance queries on Repository

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceData, BookInstanceRecord, BookInstanceStatus, BookSummary},
};

const SELECT_WITH_BOOK: &str = r#"
    SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back,
           b.id AS resolved_book_id, b.title AS book_title, b.summary AS book_summary
    FROM book_instances bi
    LEFT JOIN books b ON b.id = bi.book_id
"#;

/// Row of a book instance joined with its (possibly missing) book
#[derive(Debug, FromRow)]
struct BookInstanceJoinRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: BookInstanceStatus,
    due_back: NaiveDate,
    resolved_book_id: Option<Uuid>,
    book_title: Option<String>,
    book_summary: Option<String>,
}

impl From<BookInstanceJoinRow> for BookInstanceRecord {
    fn from(row: BookInstanceJoinRow) -> Self {
        let book = match (row.resolved_book_id, row.book_title) {
            (Some(id), Some(title)) => Some(
                BookSummary {
                    id,
                    title,
                    summary: row.book_summary.unwrap_or_default(),
                    url: String::new(),
                }
                .with_url(),
            ),
            _ => None,
        };
        BookInstanceRecord {
            instance: BookInstance {
                id: row.id,
                book: row.book_id,
                imprint: row.imprint,
                status: row.status,
                due_back: row.due_back,
            },
            book,
        }
    }
}

impl Repository {
    /// All book instances with their book resolved
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceRecord>> {
        let query = format!("{} ORDER BY b.title ASC NULLS LAST, bi.due_back ASC", SELECT_WITH_BOOK);
        let rows = sqlx::query_as::<_, BookInstanceJoinRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(BookInstanceRecord::from).collect())
    }

    pub async fn book_instances_find(&self, id: Uuid) -> AppResult<Option<BookInstanceRecord>> {
        let query = format!("{} WHERE bi.id = $1", SELECT_WITH_BOOK);
        let row = sqlx::query_as::<_, BookInstanceJoinRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(BookInstanceRecord::from))
    }

    pub async fn book_instances_insert(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.book)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn book_instances_replace(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query_as::<_, BookInstance>(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(instance.id)
        .bind(instance.book)
        .bind(&instance.imprint)
        .bind(instance.status)
        .bind(instance.due_back)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn book_instances_remove(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
