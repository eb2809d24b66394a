//! Mapping of handler failures to HTTP responses.
//!
//! Client errors get a plain-text body with the fixed message from
//! `todo_core`. Not-found and storage failures get an empty body. None of
//! these responses carry a Content-Type header.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::{PayloadError, ValidationError};
use tracing::{debug, error};

use crate::store::StoreError;

const MALFORMED_PAYLOAD_MSG: &str = "Malformed JSON payload.";
const DELETE_FAILED_MSG: &str = "Deletion of todo entry failed without database error.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("todo not found")]
    NotFound,

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// The row existed but the delete did not remove exactly one row.
    #[error("delete affected an unexpected number of rows")]
    DeleteFailed,
}

impl ApiError {
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| ApiError::Storage { context, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => plain(StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Payload(e) => {
                debug!(error = %e, "Rejecting request body");
                plain(StatusCode::BAD_REQUEST, MALFORMED_PAYLOAD_MSG)
            }
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Storage { context, source } => {
                error!(error = %source, "{context}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::DeleteFailed => {
                error!("{DELETE_FAILED_MSG}");
                plain(StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED_MSG)
            }
        }
    }
}

fn plain(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Body::from(message.into())).into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::header::CONTENT_TYPE;
    use http_body_util::BodyExt;

    use super::*;

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_plain_400() {
        let resp = ApiError::from(ValidationError::EmptyText).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(
            body_string(resp).await,
            "Empty todo text supplied. This field must be non-empty."
        );
    }

    #[tokio::test]
    async fn not_found_is_empty_404() {
        let resp = ApiError::NotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(CONTENT_TYPE).is_none());
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn storage_error_hides_detail() {
        let source = StoreError::DuplicateId(uuid::Uuid::nil());
        let resp = ApiError::storage("creating todo")(source).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn delete_failed_is_500_with_message() {
        let resp = ApiError::DeleteFailed.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(resp).await, DELETE_FAILED_MSG);
    }
}
