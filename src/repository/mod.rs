//! Repository layer for catalog persistence
//!
//! [`CatalogStore`] is the persistence contract the controllers depend on.
//! [`Repository`] implements it over PostgreSQL; [`memory::MemoryRepository`]
//! keeps everything in process for development and tests.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceRecord,
        BookSummary,
    },
};

pub use memory::MemoryRepository;

/// Document-store style operations over authors, books and book instances
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All authors, sorted by family name
    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>>;
    /// Save a new author; the store assigns the identifier
    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author>;
    /// Full replace; `None` when nothing is stored under that id
    async fn replace_author(&self, author: &Author) -> AppResult<Option<Author>>;
    /// Returns whether a record was removed
    async fn remove_author(&self, id: Uuid) -> AppResult<bool>;

    /// Title projection of every book, sorted by title
    async fn list_books(&self) -> AppResult<Vec<BookSummary>>;
    /// Books whose author reference points at `author_id`
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>>;
    async fn insert_book(&self, data: &BookData) -> AppResult<Book>;

    /// All book instances with their book resolved
    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceRecord>>;
    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceRecord>>;
    async fn insert_book_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn replace_book_instance(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>>;
    async fn remove_book_instance(&self, id: Uuid) -> AppResult<bool>;

    /// Connectivity check for readiness probes
    async fn ping(&self) -> AppResult<()>;
}

/// PostgreSQL-backed catalog store
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors_list().await
    }

    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        self.authors_find(id).await
    }

    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author> {
        self.authors_insert(data).await
    }

    async fn replace_author(&self, author: &Author) -> AppResult<Option<Author>> {
        self.authors_replace(author).await
    }

    async fn remove_author(&self, id: Uuid) -> AppResult<bool> {
        self.authors_remove(id).await
    }

    async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        self.books_list().await
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        self.books_by_author_id(author_id).await
    }

    async fn insert_book(&self, data: &BookData) -> AppResult<Book> {
        self.books_insert(data).await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceRecord>> {
        self.book_instances_list().await
    }

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceRecord>> {
        self.book_instances_find(id).await
    }

    async fn insert_book_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        self.book_instances_insert(data).await
    }

    async fn replace_book_instance(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        self.book_instances_replace(instance).await
    }

    async fn remove_book_instance(&self, id: Uuid) -> AppResult<bool> {
        self.book_instances_remove(id).await
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
