use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Public message for any failure the caller should not see the details of.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred.";

/// Public message for requests using a method the route does not serve.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Upstream error {status}: {message}")]
    Upstream {
        status: StatusCode,
        message: String,
        /// Remote detail; omitted from the body when the remote gave none.
        error: Option<String>,
    },

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// JSON body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                METHOD_NOT_ALLOWED_MESSAGE.to_string(),
                None,
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotConfigured(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::Upstream {
                status,
                message,
                error,
            } => (status, message, error),
            AppError::InternalError(err) | AppError::ConfigError(err) => {
                // Detail stays in the logs; the caller only gets the generic message.
                tracing::error!(error = ?err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { message, error })).into_response()
    }
}
