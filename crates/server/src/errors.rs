use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use service::accounts::errors::AccountsError;
use thiserror::Error;
use tracing::{error, warn};

/// Error body returned by every accounts endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseDto {
    pub api_path: String,
    pub error_code: String,
    pub error_message: String,
    pub error_time: String,
}

/// Handler error carrying the request path for the response body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub path: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { status, path: path.into(), message: message.into() }
    }

    pub fn from_accounts(path: impl Into<String>, e: &AccountsError) -> Self {
        Self::new(status_for(e), path, e.to_string())
    }
}

pub fn status_for(e: &AccountsError) -> StatusCode {
    match e {
        AccountsError::Validation(_) => StatusCode::BAD_REQUEST,
        AccountsError::Conflict(_) => StatusCode::CONFLICT,
        AccountsError::NotFound { .. } => StatusCode::NOT_FOUND,
        AccountsError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(path = %self.path, status = self.status.as_u16(), error = %self.message, "request failed");
        } else {
            warn!(path = %self.path, status = self.status.as_u16(), error = %self.message, "request rejected");
        }
        let body = ErrorResponseDto {
            api_path: self.path,
            error_code: self.status.as_u16().to_string(),
            error_message: self.message,
            error_time: Utc::now().to_rfc3339(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
