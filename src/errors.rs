// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use crate::db::StoreError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Longest store error description forwarded to clients
pub const MAX_ERROR_DETAIL: usize = 200;

/// Application-specific error types
/// DOCUMENTATION: Closed taxonomy of request failures
/// Each variant maps to one HTTP status code and error code
#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convert PlacesError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for PlacesError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            PlacesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacesError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PlacesError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PlacesError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl PlacesError {
    /// Machine-readable code placed in the error body
    pub fn code(&self) -> &'static str {
        match self {
            PlacesError::NotFound(_) => "NOT_FOUND",
            PlacesError::DatabaseError(_) => "DATABASE_ERROR",
            PlacesError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            PlacesError::InvalidInput(_) => "INVALID_INPUT",
        }
    }
}

/// Store failures keep their kind but lose anything past MAX_ERROR_DETAIL chars
impl From<StoreError> for PlacesError {
    fn from(err: StoreError) -> Self {
        let detail = truncate_detail(&err.to_string());
        match err {
            StoreError::Unavailable(_) => PlacesError::StoreUnavailable(detail),
            StoreError::Query(_) | StoreError::Malformed(_) => PlacesError::DatabaseError(detail),
        }
    }
}

/// Cut a message to MAX_ERROR_DETAIL characters on a char boundary
pub fn truncate_detail(message: &str) -> String {
    match message.char_indices().nth(MAX_ERROR_DETAIL) {
        Some((idx, _)) => format!("{}...", &message[..idx]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PlacesError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            PlacesError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PlacesError::StoreUnavailable("x".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let err: PlacesError = StoreError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, PlacesError::StoreUnavailable(_)));

        let err: PlacesError = StoreError::Query("syntax error".into()).into();
        assert!(matches!(err, PlacesError::DatabaseError(_)));
    }

    #[test]
    fn test_truncate_detail() {
        assert_eq!(truncate_detail("short"), "short");

        let long = "é".repeat(MAX_ERROR_DETAIL + 50);
        let cut = truncate_detail(&long);
        assert_eq!(cut.chars().count(), MAX_ERROR_DETAIL + 3);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_long_store_error_is_bounded() {
        let err: PlacesError = StoreError::Query("x".repeat(1000)).into();
        match err {
            PlacesError::DatabaseError(detail) => {
                assert!(detail.chars().count() <= MAX_ERROR_DETAIL + 3)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
