//! API errors and their JSON envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::booking::BookingError;
use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Duration, date, or time out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required booking fields were left empty
    #[error("Missing information: {0}")]
    MissingInformation(String),

    /// Unknown booking or catalog id
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::MissingInformation(msg) => ApiError::MissingInformation(msg),
            e @ (BookingError::InvalidDuration { .. }
            | BookingError::InvalidDate(_)
            | BookingError::InvalidTime(_)) => ApiError::Validation(e.to_string()),
            e @ (BookingError::NotFound(_) | BookingError::ItemNotFound { .. }) => {
                ApiError::NotFound(e.to_string())
            }
            BookingError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MissingInformation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine-readable code clients branch on
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::MissingInformation(_) => "MISSING_INFORMATION",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Storage(StorageError::Corruption { .. }) => "STORAGE_CORRUPTION",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Io(_) => "IO_ERROR",
        }
    }
}

/// `{ "error": { "code", "message" }, "request_id" }`
#[derive(Serialize)]
struct Envelope<'a> {
    error: Detail<'a>,
    request_id: String,
}

#[derive(Serialize)]
struct Detail<'a> {
    code: &'a str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(request_id = %request_id, code = self.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(request_id = %request_id, code = self.code(), error = %self, "Request rejected");
        }

        let envelope = Envelope {
            error: Detail {
                code: self.code(),
                message: self.to_string(),
            },
            request_id,
        };
        (status, Json(envelope)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::BookingKind;

    #[test]
    fn test_booking_error_mapping() {
        let err: ApiError = BookingError::MissingInformation("date".to_string()).into();
        assert_eq!((err.status(), err.code()), (StatusCode::BAD_REQUEST, "MISSING_INFORMATION"));

        let err: ApiError = BookingError::InvalidTime("7pm".to_string()).into();
        assert_eq!((err.status(), err.code()), (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"));

        let err: ApiError = BookingError::ItemNotFound {
            kind: BookingKind::Facility,
            id: 77,
        }
        .into();
        assert_eq!((err.status(), err.code()), (StatusCode::NOT_FOUND, "NOT_FOUND"));

        let err: ApiError = BookingError::Storage(StorageError::Corruption {
            key: "medspaceBookings".to_string(),
            reason: "eof".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "STORAGE_CORRUPTION");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("Facility 9".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let err = ApiError::Storage(StorageError::InvalidKey("../x".to_string()));
        assert_eq!((err.status(), err.code()), (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"));
    }
}
