//! Service-layer error type
//!
//! `ServiceError` bridges repository errors (`RepoError`) and collaborator
//! failures to the API-layer error (`AppError`), so services can use `?`
//! on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::repository::RepoError;

/// - `Storage`: database failures (logged, surfaced as a generic DatabaseError)
/// - `Upstream`: a remote collaborator failed (logged, surfaced as UpstreamError)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Storage(String),
    Upstream(String),
    App(AppError),
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Database(msg) => ServiceError::Storage(msg),
            RepoError::NotFound(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::NotFound, msg))
            }
            RepoError::Duplicate(msg) => {
                ServiceError::App(AppError::with_message(ErrorCode::EmployeeCodeExists, msg))
            }
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Storage(msg) => {
                tracing::error!(error = %msg, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
            ServiceError::Upstream(msg) => {
                tracing::error!(error = %msg, "Upstream service error");
                AppError::new(ErrorCode::UpstreamError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
