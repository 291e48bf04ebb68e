use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::CatalogError;

/// Everything a handler can fail with, mapped onto an HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A listing matched no rows.
    #[error("Could not find any rows")]
    Empty,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// A path segment or query parameter failed to parse.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Internal error: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::Invalid(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound { .. } | CatalogError::Ambiguous { .. } => {
                    StatusCode::NOT_FOUND
                }
                CatalogError::Conflict(_) => StatusCode::CONFLICT,
                CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Empty => StatusCode::NOT_FOUND,
            Self::MalformedPayload(_) | Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedPayload(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
