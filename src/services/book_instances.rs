//! Book instance controllers

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        BookInstance, BookInstanceForm, BookInstanceInput, BookInstanceRecord, BookInstanceStatus,
        BookInstanceView, BookSummary,
    },
    repository::CatalogStore,
    validation::FieldError,
    views::View,
};

pub const BOOK_INSTANCE_LIST_URL: &str = "/catalog/bookinstances";

#[derive(Serialize)]
struct BookInstanceListPage {
    title: &'static str,
    bookinstance_list: Vec<BookInstanceView>,
}

#[derive(Serialize)]
struct BookInstanceDetailPage {
    title: String,
    bookinstance: BookInstanceView,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BookInstanceFormValues {
    Stored(BookInstanceView),
    Submitted(BookInstanceInput),
}

#[derive(Serialize)]
struct BookInstanceFormPage {
    title: &'static str,
    book_list: Vec<BookSummary>,
    status_list: [BookInstanceStatus; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_book: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bookinstance: Option<BookInstanceFormValues>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct BookInstanceDeletePage {
    title: &'static str,
    bookinstance: BookInstanceView,
}

fn copy_not_found() -> AppError {
    AppError::NotFound("Book copy not found".to_string())
}

#[derive(Clone)]
pub struct BookInstancesService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstancesService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<View> {
        let records = self.store.list_book_instances().await?;
        View::render(
            "bookinstance_list",
            &BookInstanceListPage {
                title: "Book Instance List",
                bookinstance_list: records.into_iter().map(BookInstanceView::from).collect(),
            },
        )
    }

    /// A copy whose book reference does not resolve counts as missing
    pub async fn detail(&self, id: Uuid) -> AppResult<View> {
        let record = self
            .store
            .find_book_instance(id)
            .await?
            .ok_or_else(copy_not_found)?;
        let Some(book) = record.book.as_ref() else {
            tracing::warn!(bookinstance_id = %id, book_id = %record.instance.book, "dangling book reference");
            return Err(copy_not_found());
        };

        View::render(
            "bookinstance_detail",
            &BookInstanceDetailPage {
                title: format!("Copy: {}", book.title),
                bookinstance: record.into(),
            },
        )
    }

    pub async fn create_form(&self) -> AppResult<View> {
        let book_list = self.store.list_books().await?;
        render_form("Create BookInstance", book_list, None, None, Vec::new())
    }

    pub async fn create(&self, form: &BookInstanceForm) -> AppResult<View> {
        let input = form.sanitize();
        let data = match input.check() {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "book instance create rejected");
                return self.rerender("Create BookInstance", input, errors).await;
            }
        };

        let instance = self.store.insert_book_instance(&data).await?;
        tracing::info!(bookinstance_id = %instance.id, book_id = %instance.book, "book instance created");
        Ok(View::redirect(instance.url()))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<View> {
        let record = self
            .store
            .find_book_instance(id)
            .await?
            .ok_or_else(copy_not_found)?;
        View::render(
            "bookinstance_delete",
            &BookInstanceDeletePage {
                title: "Delete Copy",
                bookinstance: record.into(),
            },
        )
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<View> {
        if self.store.remove_book_instance(id).await? {
            tracing::info!(bookinstance_id = %id, "book instance deleted");
        }
        Ok(View::redirect(BOOK_INSTANCE_LIST_URL))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<View> {
        let (record, book_list) =
            tokio::try_join!(self.store.find_book_instance(id), self.store.list_books())?;
        let record: BookInstanceRecord = record.ok_or_else(copy_not_found)?;
        let selected_book = Some(record.instance.book);
        render_form(
            "Update BookInstance",
            book_list,
            selected_book,
            Some(BookInstanceFormValues::Stored(record.into())),
            Vec::new(),
        )
    }

    pub async fn update(&self, id: Uuid, form: &BookInstanceForm) -> AppResult<View> {
        let input = form.sanitize().with_id(id);
        let data = match input.check() {
            Ok(data) => data,
            Err(errors) => {
                tracing::debug!(bookinstance_id = %id, errors = errors.len(), "book instance update rejected");
                return self.rerender("Update BookInstance", input, errors).await;
            }
        };

        let instance = self
            .store
            .replace_book_instance(&BookInstance::from_data(id, data))
            .await?
            .ok_or_else(copy_not_found)?;
        tracing::info!(bookinstance_id = %instance.id, "book instance updated");
        Ok(View::redirect(instance.url()))
    }

    /// The form needs a fresh book list whatever the validation outcome
    async fn rerender(
        &self,
        title: &'static str,
        input: BookInstanceInput,
        errors: Vec<FieldError>,
    ) -> AppResult<View> {
        let book_list = self.store.list_books().await?;
        let selected_book = input.selected_book();
        render_form(
            title,
            book_list,
            selected_book,
            Some(BookInstanceFormValues::Submitted(input)),
            errors,
        )
    }
}

fn render_form(
    title: &'static str,
    book_list: Vec<BookSummary>,
    selected_book: Option<Uuid>,
    bookinstance: Option<BookInstanceFormValues>,
    errors: Vec<FieldError>,
) -> AppResult<View> {
    View::render(
        "bookinstance_form",
        &BookInstanceFormPage {
            title,
            book_list,
            status_list: BookInstanceStatus::ALL,
            selected_book,
            bookinstance,
            errors,
        },
    )
}
