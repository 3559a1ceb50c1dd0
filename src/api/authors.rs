//! Author endpoints

use axum::{extract::State, Form};
use uuid::Uuid;

use super::Path;
use crate::{
    error::AppResult,
    models::AuthorForm,
    views::View,
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "author_list view", body = crate::views::RenderedView)
    )
)]
pub async fn author_list(State(state): State<AppState>) -> AppResult<View> {
    state.services.authors.list().await
}

/// Author details with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_detail view", body = crate::views::RenderedView),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.authors.detail(id).await
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "author_form view", body = crate::views::RenderedView)
    )
)]
pub async fn author_create_get(State(state): State<AppState>) -> AppResult<View> {
    state.services.authors.create_form()
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "author_form view with validation errors", body = crate::views::RenderedView),
        (status = 303, description = "Created; redirect to the author")
    )
)]
pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<View> {
    state.services.authors.create(&form).await
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_delete view", body = crate::views::RenderedView),
        (status = 303, description = "Unknown author; redirect to the list")
    )
)]
pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.authors.delete_form(id).await
}

/// Delete an author that no book references
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_delete view listing blocking books", body = crate::views::RenderedView),
        (status = 303, description = "Deleted; redirect to the list")
    )
)]
pub async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.authors.delete(id).await
}

/// Author form pre-populated for editing
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_form view", body = crate::views::RenderedView),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.authors.update_form(id).await
}

/// Replace an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "author_form view with validation errors", body = crate::views::RenderedView),
        (status = 303, description = "Updated; redirect to the author"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<AuthorForm>,
) -> AppResult<View> {
    state.services.authors.update(id, &form).await
}
