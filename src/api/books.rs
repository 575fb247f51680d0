//! Book collection endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderName, StatusCode},
    response::AppendHeaders,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookDraft, BookQuery},
};

use super::AuthenticatedUser;

/// One page of the caller's shelf
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookListResponse {
    pub books: Vec<Book>,
    /// Total records matching the filter, before pagination
    pub total_count: usize,
    pub page: usize,
    pub page_size: usize,
}

/// List books with search, sort, and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "One page of books", body = BookListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<BookListResponse>> {
    let (books, total_count) = state.services.library.list_books(&claims.user_id, &query)?;

    Ok(Json(BookListResponse {
        books,
        total_count,
        page: query.page(),
        page_size: query.page_size(),
    }))
}

/// Get one book by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    let book = state.services.library.get_book(&id, &claims.user_id)?;
    Ok(Json(book))
}

/// Add a book to the caller's shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookDraft,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Rejected content or collection full"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(draft): Json<BookDraft>,
) -> AppResult<(
    StatusCode,
    AppendHeaders<[(HeaderName, String); 1]>,
    Json<Book>,
)> {
    let book = state.services.library.add_book(&claims.user_id, draft)?;

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(LOCATION, format!("/api/books/{}", book.id))]),
        Json(book),
    ))
}

/// Replace a book's content
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookDraft,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Rejected content"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    Json(draft): Json<BookDraft>,
) -> AppResult<Json<Book>> {
    let book = state.services.library.update_book(&id, &claims.user_id, draft)?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.services.library.delete_book(&id, &claims.user_id)?;
    Ok(StatusCode::NO_CONTENT)
}
