//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Local library catalog: authors and book copies"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::author_list,
        authors::author_detail,
        authors::author_create_get,
        authors::author_create_post,
        authors::author_delete_get,
        authors::author_delete_post,
        authors::author_update_get,
        authors::author_update_post,
        // Book instances
        book_instances::bookinstance_list,
        book_instances::bookinstance_detail,
        book_instances::bookinstance_create_get,
        book_instances::bookinstance_create_post,
        book_instances::bookinstance_delete_get,
        book_instances::bookinstance_delete_post,
        book_instances::bookinstance_update_get,
        book_instances::bookinstance_update_post,
    ),
    components(
        schemas(
            crate::models::author::Author,
            crate::models::author::AuthorView,
            crate::models::author::AuthorForm,
            crate::models::author::AuthorInput,
            crate::models::book::BookSummary,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::BookInstanceStatus,
            crate::models::book_instance::BookInstanceView,
            crate::models::book_instance::BookInstanceForm,
            crate::models::book_instance::BookInstanceInput,
            crate::validation::FieldError,
            crate::views::RenderedView,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author catalog"),
        (name = "bookinstances", description = "Book copies")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
