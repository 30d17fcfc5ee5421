//! Unified error system for the HRMS service
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Tenant errors
//! - 2xxx: Employee errors
//! - 3xxx: Jurisdiction errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::EmployeeNotFound);
//!
//! let err = AppError::validation("Invalid email format")
//!     .with_detail("field", "email");
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
