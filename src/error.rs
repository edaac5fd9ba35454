/*
 * Responsibility
 * - the app-wide AppError
 * - IntoResponse (HTTP status / JSON error body)
 * - one place that turns RepoError / ServiceError / IdCodecError / extractor rejections into it
 */
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::RepoError;
use crate::services::ServiceError;
use crate::services::id_codec::IdCodecError;
use crate::services::validation::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("store unavailable")]
    StoreUnavailable,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_id() -> Self {
        Self::bad_request("INVALID_ID", "invalid id")
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, field) = match self {
            AppError::BadRequest { code, message } => (code, message, None),
            AppError::Validation { field, message } => ("VALIDATION_ERROR", message, Some(field)),
            AppError::NotFound { resource } => {
                ("not_found", format!("{resource} not found."), None)
            }
            AppError::PayloadTooLarge => (
                "PAYLOAD_TOO_LARGE",
                "request body too large".into(),
                None,
            ),
            AppError::StoreUnavailable => (
                "STORE_UNAVAILABLE",
                "store temporarily unavailable".into(),
                None,
            ),
            AppError::Internal => (
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = ?e, "store operation failed");
        match e {
            RepoError::Unavailable(_) => AppError::StoreUnavailable,
            RepoError::Db(_) => AppError::Internal,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation {
            field: e.field,
            message: e.message,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(v) => v.into(),
            ServiceError::NotFound(resource) => AppError::not_found(resource),
            ServiceError::Store(repo) => repo.into(),
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        if e.is_malformed_input() {
            // Client supplied a malformed public id (e.g. /ideas/{id}/upvote)
            AppError::invalid_id()
        } else {
            // Server-side config / programming error
            tracing::error!(error = %e, "id codec failure");
            AppError::Internal
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON whose shape doesn't match (missing `title`, wrong type ...)
            JsonRejection::JsonDataError(e) => AppError::validation("body", e.body_text()),
            // Streamed bodies cut off by the body limit layer.
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
            other => AppError::bad_request("BAD_REQUEST", other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation("query", rejection.body_text())
    }
}
