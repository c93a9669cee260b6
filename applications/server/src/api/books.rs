/// Books API routes
use crate::{
    config::ApiSettings,
    error::{Result, ServerError},
    extract::ValidatedJson,
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shelf_core::{
    sort::DEFAULT_SORT, Book, BookId, BookPage, CreateBook, ListQuery, SortSpec, UpdateBook,
    Validate, ValidationError,
};

/// Body of `PUT /books/:id`: a full book whose `id`, if any, is ignored
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ReplaceBook(pub CreateBook);

impl Validate for ReplaceBook {
    fn validate(self) -> std::result::Result<Self, ValidationError> {
        let mut book = self.0;
        book.id = None;
        Ok(Self(book.validate()?))
    }
}

/// Query string of `GET /books`
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Apply defaults and bounds
    pub fn into_query(self, api: &ApiSettings) -> Result<ListQuery> {
        let limit = match self.limit {
            None => api.default_limit,
            Some(limit) if (1..=i64::from(api.max_limit)).contains(&limit) => limit as u32,
            Some(limit) => {
                return Err(ServerError::BadRequest(format!(
                    "limit must be between 1 and {} (got {})",
                    api.max_limit, limit
                )))
            }
        };

        let offset = match self.offset {
            None => 0,
            Some(offset) => u32::try_from(offset).map_err(|_| {
                ServerError::BadRequest(format!("offset must be 0 or greater (got {})", offset))
            })?,
        };

        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => SortSpec::parse(DEFAULT_SORT),
            Some(token) => SortSpec::parse(token),
        };

        Ok(ListQuery::new(limit, offset, sort))
    }
}

/// POST /books
/// Create a book
pub async fn create_book(
    State(app_state): State<AppState>,
    ValidatedJson(book): ValidatedJson<CreateBook>,
) -> Result<(StatusCode, Json<Book>)> {
    let book = app_state.store.create_book(book).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// GET /books
/// One page of books, newest first unless `sort` says otherwise
pub async fn list_books(
    State(app_state): State<AppState>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<BookPage>> {
    let Query(params) = params.map_err(|e| ServerError::BadRequest(e.body_text()))?;
    let query = params.into_query(&app_state.api)?;

    let page = app_state.store.list_books(&query).await?;
    Ok(Json(page))
}

/// GET /books/:id
pub async fn get_book(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Book>> {
    let book_id = BookId::new(id);
    let book = app_state
        .store
        .get_book(&book_id)
        .await?
        .ok_or_else(|| ServerError::book_not_found(&book_id))?;

    Ok(Json(book))
}

/// PUT /books/:id
/// Replace every field of a book; `cover_url` and `isbn` are cleared when omitted
pub async fn replace_book(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    ValidatedJson(ReplaceBook(book)): ValidatedJson<ReplaceBook>,
) -> Result<Json<Book>> {
    let book_id = BookId::new(id);
    let book = app_state
        .store
        .update_book(&book_id, book.into_replacement())
        .await?
        .ok_or_else(|| ServerError::book_not_found(&book_id))?;

    Ok(Json(book))
}

/// PATCH /books/:id
/// Change only the fields present in the body
pub async fn update_book(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    ValidatedJson(changes): ValidatedJson<UpdateBook>,
) -> Result<Json<Book>> {
    if changes.is_empty() {
        return Err(ServerError::BadRequest("Nothing to update".to_string()));
    }

    let book_id = BookId::new(id);
    let book = app_state
        .store
        .update_book(&book_id, changes)
        .await?
        .ok_or_else(|| ServerError::book_not_found(&book_id))?;

    Ok(Json(book))
}

/// DELETE /books/:id
pub async fn delete_book(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    let book_id = BookId::new(id);
    if app_state.store.delete_book(&book_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::book_not_found(&book_id))
    }
}
