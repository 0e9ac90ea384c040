use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the services. Storage and collaborator errors arrive as
/// `anyhow::Error` and become `ServerError`.
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("server error: {0}")]
    ServerError(String),
}

pub type CmsResult<T> = Result<T, CmsError>;

impl From<anyhow::Error> for CmsError {
    fn from(err: anyhow::Error) -> Self {
        CmsError::ServerError(format!("{err:#}"))
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl CmsError {
    pub fn status(&self) -> StatusCode {
        match self {
            CmsError::NotFound(_) => StatusCode::NOT_FOUND,
            CmsError::Unauthorized => StatusCode::UNAUTHORIZED,
            CmsError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CmsError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a client. Server error detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            CmsError::ServerError(_) => "An unexpected error occurred".into(),
            other => other.to_string(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CmsError::NotFound(_) => "NOT_FOUND",
            CmsError::Unauthorized => "UNAUTHORIZED",
            CmsError::BadRequest(_) => "BAD_REQUEST",
            CmsError::ServerError(_) => "SERVER_ERROR",
        }
    }
}

impl IntoResponse for CmsError {
    fn into_response(self) -> Response {
        if let CmsError::ServerError(detail) = &self {
            tracing::error!("Internal error: {}", detail);
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.public_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}
