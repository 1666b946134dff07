use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::MetadataError;

/// Body for requests that fail before any source is fetched.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    Configuration { message: String },
    MethodNotAllowed,
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Configuration { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<MetadataError> for AppError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Validation(message) => AppError::Validation { message },
            MetadataError::Configuration(message) => AppError::Configuration { message },
        }
    }
}

/// RFC 3339 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::MethodNotAllowed => ErrorBody {
                success: false,
                error: "Method not allowed".to_string(),
                timestamp: None,
            },
            AppError::Validation { message }
            | AppError::Configuration { message }
            | AppError::Internal { message } => {
                if status.is_server_error() {
                    tracing::error!(error = %message, "Metadata request failed");
                } else {
                    tracing::debug!(error = %message, "Metadata request rejected");
                }
                ErrorBody {
                    success: false,
                    error: message,
                    timestamp: Some(iso_timestamp(Utc::now())),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}
