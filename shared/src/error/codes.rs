//! Unified error codes for the HRMS service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Tenant / request context errors
//! - 2xxx: Employee errors
//! - 3xxx: Jurisdiction errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Tenant ====================
    /// Tenant header missing
    TenantRequired = 1001,

    // ==================== 2xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 2001,
    /// Employee code already exists in the tenant
    EmployeeCodeExists = 2002,
    /// Employee type not in the allowed set
    InvalidEmployeeType = 2003,
    /// Employee status not in the allowed set
    InvalidEmployeeStatus = 2004,
    /// Status transition not allowed from the current status
    InvalidStatusTransition = 2005,

    // ==================== 3xxx: Jurisdiction ====================
    /// Jurisdiction not found
    JurisdictionNotFound = 3001,
    /// Boundary code unknown to the boundary service
    InvalidBoundary = 3002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Upstream service failed
    UpstreamError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Tenant
            ErrorCode::TenantRequired => "X-Tenant-ID header is required",

            // Employee
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeCodeExists => "Employee code already exists",
            ErrorCode::InvalidEmployeeType => "Invalid employee type",
            ErrorCode::InvalidEmployeeStatus => "Invalid employee status",
            ErrorCode::InvalidStatusTransition => "Status transition not allowed",

            // Jurisdiction
            ErrorCode::JurisdictionNotFound => "Jurisdiction not found",
            ErrorCode::InvalidBoundary => "Invalid boundary code",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::UpstreamError => "Upstream service error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Tenant
            1001 => Ok(ErrorCode::TenantRequired),

            // Employee
            2001 => Ok(ErrorCode::EmployeeNotFound),
            2002 => Ok(ErrorCode::EmployeeCodeExists),
            2003 => Ok(ErrorCode::InvalidEmployeeType),
            2004 => Ok(ErrorCode::InvalidEmployeeStatus),
            2005 => Ok(ErrorCode::InvalidStatusTransition),

            // Jurisdiction
            3001 => Ok(ErrorCode::JurisdictionNotFound),
            3002 => Ok(ErrorCode::InvalidBoundary),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::UpstreamError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
