//! Author controllers: list, detail, create, delete and update workflows

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, AuthorInput, AuthorView, BookSummary},
    repository::CatalogStore,
    validation::FieldError,
    views::View,
};

pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

#[derive(Serialize)]
struct AuthorListPage {
    title: &'static str,
    author_list: Vec<AuthorView>,
}

#[derive(Serialize)]
struct AuthorDetailPage {
    title: &'static str,
    author: AuthorView,
    author_books: Vec<BookSummary>,
}

/// Values the author form is pre-populated with
#[derive(Serialize)]
#[serde(untagged)]
enum AuthorFormValues {
    Stored(AuthorView),
    Submitted(AuthorInput),
}

#[derive(Serialize)]
struct AuthorFormPage {
    title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<AuthorFormValues>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct AuthorDeletePage {
    title: &'static str,
    author: Option<AuthorView>,
    author_books: Vec<BookSummary>,
}

#[derive(Clone)]
pub struct AuthorsService {
    store: Arc<dyn CatalogStore>,
}

impl AuthorsService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Author plus the books referencing it, fetched concurrently
    async fn author_with_books(&self, id: Uuid) -> AppResult<(Option<Author>, Vec<BookSummary>)> {
        tokio::try_join!(self.store.find_author(id), self.store.books_by_author(id))
    }

    pub async fn list(&self) -> AppResult<View> {
        let authors = self.store.list_authors().await?;
        View::render(
            "author_list",
            &AuthorListPage {
                title: "Author List",
                author_list: authors.into_iter().map(AuthorView::from).collect(),
            },
        )
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<View> {
        let (author, author_books) = self.author_with_books(id).await?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        View::render(
            "author_detail",
            &AuthorDetailPage {
                title: "Author Detail",
                author: author.into(),
                author_books,
            },
        )
    }

    pub fn create_form(&self) -> AppResult<View> {
        render_form("Create Author", None, Vec::new())
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<View> {
        let input = form.sanitize();
        let data = match input.check() {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "author create rejected");
                return render_form("Create Author", Some(AuthorFormValues::Submitted(input)), errors);
            }
        };

        let author = self.store.insert_author(&data).await?;
        tracing::info!(author_id = %author.id, name = %author.name(), "author created");
        Ok(View::redirect(author.url()))
    }

    /// Confirmation page; a missing author sends the user back to the list
    pub async fn delete_form(&self, id: Uuid) -> AppResult<View> {
        let (author, author_books) = self.author_with_books(id).await?;
        let Some(author) = author else {
            return Ok(View::redirect(AUTHOR_LIST_URL));
        };
        render_delete(Some(author), author_books)
    }

    /// Deletes unless books still reference the author
    pub async fn delete(&self, id: Uuid) -> AppResult<View> {
        let (author, author_books) = self.author_with_books(id).await?;
        if !author_books.is_empty() {
            tracing::info!(
                author_id = %id,
                books = author_books.len(),
                "author delete blocked by referencing books"
            );
            return render_delete(author, author_books);
        }

        if self.store.remove_author(id).await? {
            tracing::info!(author_id = %id, "author deleted");
        }
        Ok(View::redirect(AUTHOR_LIST_URL))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<View> {
        let author = self
            .store
            .find_author(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        render_form(
            "Update Author",
            Some(AuthorFormValues::Stored(author.into())),
            Vec::new(),
        )
    }

    /// Full replace of the author at `id` with the submitted values
    pub async fn update(&self, id: Uuid, form: &AuthorForm) -> AppResult<View> {
        let input = form.sanitize().with_id(id);
        let data = match input.check() {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!(author_id = %id, errors = errors.len(), "author update rejected");
                return render_form("Update Author", Some(AuthorFormValues::Submitted(input)), errors);
            }
        };

        let author = self
            .store
            .replace_author(&Author::from_data(id, data))
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!(author_id = %author.id, "author updated");
        Ok(View::redirect(author.url()))
    }
}

fn render_form(
    title: &'static str,
    author: Option<AuthorFormValues>,
    errors: Vec<FieldError>,
) -> AppResult<View> {
    View::render("author_form", &AuthorFormPage { title, author, errors })
}

fn render_delete(author: Option<Author>, author_books: Vec<BookSummary>) -> AppResult<View> {
    View::render(
        "author_delete",
        &AuthorDeletePage {
            title: "Delete Author",
            author: author.map(AuthorView::from),
            author_books,
        },
    )
}
