//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type returned to HTTP clients:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, resource id)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a required-field error naming the field
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{} is required", field))
            .with_detail("field", field)
    }

    /// Create an invalid-format error naming the field
    pub fn invalid_format(field: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, msg).with_detail("field", field)
    }

    /// Create an employee not found error
    pub fn employee_not_found() -> Self {
        Self::with_message(ErrorCode::EmployeeNotFound, "employee not found")
    }

    /// Create a jurisdiction not found error
    pub fn jurisdiction_not_found() -> Self {
        Self::with_message(ErrorCode::JurisdictionNotFound, "jurisdiction not found")
    }

    /// Create a duplicate employee code error
    pub fn duplicate_code(code: impl Into<String>) -> Self {
        let c = code.into();
        Self::with_message(
            ErrorCode::EmployeeCodeExists,
            format!("employee with code {} already exists", c),
        )
        .with_detail("code", c)
    }

    /// Create a missing tenant header error
    pub fn tenant_required() -> Self {
        Self::new(ErrorCode::TenantRequired)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Unified API response structure
///
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "email")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_convenience_constructors() {
        let err = AppError::required("department");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "department is required");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err = AppError::duplicate_code("EMP-1");
        assert_eq!(err.code, ErrorCode::EmployeeCodeExists);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err = AppError::employee_not_found();
        assert_eq!(err.message, "employee not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err = AppError::database("connection refused");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::NotFound, "Employee not found");
        assert_eq!(format!("{}", err), "Employee not found");
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::invalid_format("phone", "phone must be 10 digits starting 6-9");
        let response = ApiResponse::<()>::error(&err);

        assert_eq!(response.code, Some(6));
        assert_eq!(response.message, "phone must be 10 digits starting 6-9");
        assert!(response.data.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 6);
        assert_eq!(json["details"]["field"], "phone");
        assert!(json.get("data").is_none());
    }
}
