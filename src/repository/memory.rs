//! In-process catalog store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookInstanceRecord,
        BookSummary,
    },
};

#[derive(Default)]
struct Collections {
    authors: HashMap<Uuid, Author>,
    books: HashMap<Uuid, Book>,
    book_instances: HashMap<Uuid, BookInstance>,
}

impl Collections {
    fn resolve(&self, instance: &BookInstance) -> BookInstanceRecord {
        BookInstanceRecord {
            instance: instance.clone(),
            book: self.books.get(&instance.book).map(BookSummary::from),
        }
    }
}

/// Catalog store held entirely in memory; clones share the same collections
#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_title(books: &mut [BookSummary]) {
    books.sort_by(|a, b| a.title.cmp(&b.title));
}

#[async_trait]
impl CatalogStore for MemoryRepository {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let db = self.inner.read().await;
        let mut authors: Vec<Author> = db.authors.values().cloned().collect();
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors)
    }

    async fn find_author(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn insert_author(&self, data: &AuthorData) -> AppResult<Author> {
        let author = Author::from_data(Uuid::new_v4(), data.clone());
        self.inner
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author)
    }

    async fn replace_author(&self, author: &Author) -> AppResult<Option<Author>> {
        let mut db = self.inner.write().await;
        match db.authors.get_mut(&author.id) {
            Some(stored) => {
                *stored = author.clone();
                Ok(Some(author.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove_author(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.authors.remove(&id).is_some())
    }

    async fn list_books(&self) -> AppResult<Vec<BookSummary>> {
        let db = self.inner.read().await;
        let mut books: Vec<BookSummary> = db.books.values().map(BookSummary::from).collect();
        by_title(&mut books);
        Ok(books)
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let db = self.inner.read().await;
        let mut books: Vec<BookSummary> = db
            .books
            .values()
            .filter(|book| book.author == author_id)
            .map(BookSummary::from)
            .collect();
        by_title(&mut books);
        Ok(books)
    }

    async fn insert_book(&self, data: &BookData) -> AppResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            summary: data.summary.clone(),
            author: data.author,
        };
        self.inner.write().await.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceRecord>> {
        let db = self.inner.read().await;
        let mut records: Vec<BookInstanceRecord> =
            db.book_instances.values().map(|i| db.resolve(i)).collect();
        records.sort_by(|a, b| {
            // dangling references sort last
            let title = |r: &BookInstanceRecord| match &r.book {
                Some(book) => (false, book.title.clone()),
                None => (true, String::new()),
            };
            title(a)
                .cmp(&title(b))
                .then_with(|| a.instance.due_back.cmp(&b.instance.due_back))
        });
        Ok(records)
    }

    async fn find_book_instance(&self, id: Uuid) -> AppResult<Option<BookInstanceRecord>> {
        let db = self.inner.read().await;
        Ok(db.book_instances.get(&id).map(|i| db.resolve(i)))
    }

    async fn insert_book_instance(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = BookInstance::from_data(Uuid::new_v4(), data.clone());
        self.inner
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn replace_book_instance(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        let mut db = self.inner.write().await;
        match db.book_instances.get_mut(&instance.id) {
            Some(stored) => {
                *stored = instance.clone();
                Ok(Some(instance.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove_book_instance(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.book_instances.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
