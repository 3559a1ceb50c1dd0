//! Book instance endpoints

use axum::{extract::State, Form};
use uuid::Uuid;

use super::Path;
use crate::{
    error::AppResult,
    models::BookInstanceForm,
    views::View,
    AppState,
};

/// List all copies with their books
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "bookinstance_list view", body = crate::views::RenderedView)
    )
)]
pub async fn bookinstance_list(State(state): State<AppState>) -> AppResult<View> {
    state.services.book_instances.list().await
}

/// Copy details
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_detail view", body = crate::views::RenderedView),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.book_instances.detail(id).await
}

/// Empty copy form with the book picker
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "bookinstance_form view", body = crate::views::RenderedView)
    )
)]
pub async fn bookinstance_create_get(State(state): State<AppState>) -> AppResult<View> {
    state.services.book_instances.create_form().await
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "bookinstance_form view with validation errors", body = crate::views::RenderedView),
        (status = 303, description = "Created; redirect to the copy")
    )
)]
pub async fn bookinstance_create_post(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<View> {
    state.services.book_instances.create(&form).await
}

/// Delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_delete view", body = crate::views::RenderedView),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.book_instances.delete_form(id).await
}

/// Delete a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 303, description = "Deleted; redirect to the list")
    )
)]
pub async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.book_instances.delete(id).await
}

/// Copy form pre-populated for editing
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_form view", body = crate::views::RenderedView),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<View> {
    state.services.book_instances.update_form(id).await
}

/// Replace a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "bookinstance_form view with validation errors", body = crate::views::RenderedView),
        (status = 303, description = "Updated; redirect to the copy"),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookinstance_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<View> {
    state.services.book_instances.update(id, &form).await
}
