use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use realty_listings::listings::CatalogError;
use realty_listings::storage::StorageError;
use tracing::error;

use crate::pages;

/// Failure while producing a page, rendered as HTML rather than JSON.
#[derive(Debug)]
pub(crate) enum PageError {
    NotFound,
    Storage(StorageError),
    Internal(String),
}

impl From<CatalogError> for PageError {
    fn from(value: CatalogError) -> Self {
        match value {
            CatalogError::NotFound { .. } => PageError::NotFound,
            CatalogError::Storage(err) => PageError::Storage(err),
            CatalogError::Invalid(err) => PageError::Internal(err.to_string()),
        }
    }
}

impl From<StorageError> for PageError {
    fn from(value: StorageError) -> Self {
        PageError::Storage(value)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => (
                StatusCode::NOT_FOUND,
                Html(pages::not_found("Property Not Found", "Property not found")),
            )
                .into_response(),
            PageError::Storage(err) => {
                error!(error = %err, retryable = err.is_retryable(), "storage failure while rendering page");
                let mut response =
                    (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error())).into_response();
                if err.is_retryable() {
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from_static("5"));
                }
                response
            }
            PageError::Internal(message) => {
                error!(%message, "unexpected failure while rendering page");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(pages::server_error())).into_response()
            }
        }
    }
}
