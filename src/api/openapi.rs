//! OpenAPI documentation and Swagger UI

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api,
    error::ErrorResponse,
    models::{
        book::{Book, BookDraft},
        user::{LoginRequest, LoginResponse, UserDto},
    },
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booktrack API",
        description = "Personal book tracking server",
    ),
    paths(
        api::health::health_check,
        api::auth::login,
        api::auth::me,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    components(schemas(
        Book,
        BookDraft,
        LoginRequest,
        LoginResponse,
        UserDto,
        ErrorResponse,
        api::books::BookListResponse,
        api::health::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Authentication"),
        (name = "books", description = "Book collection"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Router serving the Swagger UI and the raw OpenAPI document
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
