//! API error handling
//!
//! Every failure is rendered as `{"error": "<message>"}`. Store details are logged
//! here and never sent to the client, except the not-found message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use seller_core::{ErrorKind, StoreError};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Conflict(msg)
            | ApiError::Unavailable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => {
                tracing::debug!(error = %err, "entity not found");
                ApiError::NotFound(err.detail().to_string())
            }
            ErrorKind::ConstraintViolation => {
                tracing::warn!(error = %err, "constraint violation");
                ApiError::Conflict("request conflicts with stored data".into())
            }
            ErrorKind::Unavailable => {
                tracing::error!(error = %err, "store unavailable");
                ApiError::Unavailable("service unavailable".into())
            }
            ErrorKind::Invalid => {
                tracing::error!(error = %err, "store call failed");
                ApiError::Internal("internal error".into())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(errors.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message(),
        });
        (self.status_code(), body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
