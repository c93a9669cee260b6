/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shelf_core::{ShelfError, ValidationError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] ShelfError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    pub fn book_not_found(id: impl std::fmt::Display) -> Self {
        ServerError::NotFound(format!("Book {} not found", id))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ServerError::Store(err) => match err {
                err if err.is_client_error() => (StatusCode::BAD_REQUEST, err.to_string()),
                err => {
                    tracing::error!("Data access error: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(ServerError::book_not_found("b1")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(ServerError::BadRequest("Nothing to update".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ValidationError::EmptyTitle.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShelfError::invalid_input("Nothing to update").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShelfError::Validation(ValidationError::InvalidPages(0)).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ShelfError::storage("connection refused").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
