//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, ApiError>`; the variant decides the
//! status code and the body is always `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{PartnerLimitError, RepositoryError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("resource was modified concurrently, retry the request")]
    Conflict,

    #[error("internal server error")]
    Internal(#[source] RepositoryError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict => Self::Conflict,
            other => Self::Internal(other),
        }
    }
}

impl From<PartnerLimitError> for ApiError {
    fn from(err: PartnerLimitError) -> Self {
        match err {
            PartnerLimitError::NotFound(_) | PartnerLimitError::LimitNotFound(_) => Self::NotFound,
            PartnerLimitError::InvalidOperation | PartnerLimitError::InvalidArgument => {
                Self::BadRequest(err.to_string())
            }
            PartnerLimitError::Repository(inner) => inner.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(source) = &self {
            error!(error = %source, "request failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
