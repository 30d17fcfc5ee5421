//! Repository Module
//!
//! Tenant-scoped SQL over the `employee` and `jurisdiction` tables.
//! Every query carries `tenant_id = ?`.

pub mod employee;
pub mod filter;
pub mod jurisdiction;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    /// Prefix a database error with the operation that produced it
    pub fn context(self, op: &str) -> Self {
        match self {
            RepoError::Database(msg) => RepoError::Database(format!("{op}: {msg}")),
            other => other,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return RepoError::Duplicate(db_err.message().to_string());
                }
                ErrorKind::ForeignKeyViolation => {
                    return RepoError::NotFound(db_err.message().to_string());
                }
                _ => {}
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Map a client-facing sort direction to SQL; anything but `desc` is ascending
pub(crate) fn sort_direction(order: Option<&str>) -> &'static str {
    match order {
        Some(o) if o.eq_ignore_ascii_case("desc") => "DESC",
        _ => "ASC",
    }
}
